//! Lexigraph — dictionary-relationship graph server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LEXIGRAPH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("serve");

    match command {
        "process" => {
            let config = lexigraph_core::LexigraphConfig::from_env(resolve_data_dir())?;
            lexigraph_ingest::preprocess_dictionary(&config.data_paths)
                .map_err(|e| anyhow::anyhow!("Preprocessing failed: {}", e))?;
            Ok(())
        }
        "build" => {
            let config = lexigraph_core::LexigraphConfig::from_env(resolve_data_dir())?;
            let processed = lexigraph_ingest::load_preprocessed(&config.data_paths)
                .map_err(|e| anyhow::anyhow!("Cannot load preprocessed data: {}", e))?;
            let graph = lexigraph_graph::DictionaryGraph::build(&processed.entries);
            graph
                .save(&config.data_paths.graph_file)
                .map_err(|e| anyhow::anyhow!("Cannot save graph: {}", e))?;

            let stats = graph.stats();
            info!(
                "Graph statistics: {} nodes, {} edges, average degree {:.2}",
                stats.nodes, stats.edges, stats.avg_degree
            );
            Ok(())
        }
        "serve" => serve().await,
        "--help" | "-h" | "help" => {
            println!("Lexigraph — dictionary-relationship graph server");
            println!();
            println!("Usage: lexigraph [command]");
            println!();
            println!("Commands:");
            println!("  process     Preprocess the dictionary into definition tokens");
            println!("  build       Build the dictionary graph from preprocessed data");
            println!("  serve       Start the visualization server (default)");
            println!("  help        Show this help message");
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}. Use 'lexigraph help' for usage.", other);
            std::process::exit(1);
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = lexigraph_core::LexigraphConfig::from_env(&data_dir)?;
    let port = config.port;

    let graph = lexigraph_graph::DictionaryGraph::load(&config.data_paths.graph_file)
        .map_err(|e| anyhow::anyhow!("Cannot load graph: {}", e))?;

    let state = Arc::new(AppState::new(config, graph));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Lexigraph server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
