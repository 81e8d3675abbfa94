//! Progress route — streams visualization progress updates over SSE.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::routing::get;
use axum::{Json, Router};
use futures::Stream;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::routes::is_valid_word;
use crate::state::AppState;
use lexigraph_graph::ProgressUpdate;

type SseStream = Pin<Box<dyn Stream<Item = Result<Event, Infallible>> + Send>>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/progress/{word}", get(progress))
}

/// A live subscription to a word's progress channel. Dropping it releases
/// the registry entry once this was the last subscriber; the receiver is
/// still alive while the drop runs, so "last" means a count of one.
struct ProgressSubscription {
    state: Arc<AppState>,
    word: String,
    rx: broadcast::Receiver<ProgressUpdate>,
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        self.state.release_progress(&self.word);
    }
}

/// Subscribe to a word's channel and stream its updates until a progress-100
/// event or channel close. Lagged receivers skip ahead; only the latest
/// state matters to the progress bar.
fn subscribe_stream(state: Arc<AppState>, word: String) -> SseStream {
    let rx = state.progress_sender(&word).subscribe();
    let mut sub = ProgressSubscription { state, word, rx };

    Box::pin(async_stream::stream! {
        loop {
            match sub.rx.recv().await {
                Ok(update) => {
                    let done = update.progress >= 100;
                    yield Ok::<_, Infallible>(Event::default().data(
                        serde_json::to_string(&update).unwrap()
                    ));
                    if done {
                        return;
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return,
            }
        }
    })
}

/// GET /progress/{word} — one-way stream of `{progress, message}` events for
/// the word's current visualization. Ends after a progress-100 event or when
/// the word's channel is dropped; consumers impose no ordering relative to
/// the visualize request itself.
async fn progress(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Result<Sse<SseStream>, (StatusCode, Json<serde_json::Value>)> {
    let word = word.trim().to_lowercase();
    if !is_valid_word(&word) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Invalid word format" })),
        ));
    }

    Ok(Sse::new(subscribe_stream(state, word)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use lexigraph_core::{DataPaths, LexigraphConfig};
    use lexigraph_graph::DictionaryGraph;
    use std::collections::HashMap;

    fn test_state() -> Arc<AppState> {
        let dir = tempfile::tempdir().unwrap();
        let config = LexigraphConfig {
            port: 0,
            data_paths: DataPaths::new(dir.path()).unwrap(),
        };
        Arc::new(AppState::new(config, DictionaryGraph::build(&HashMap::new())))
    }

    #[tokio::test]
    async fn test_stream_ends_after_completion_event() {
        let state = test_state();
        let tx = state.progress_sender("cat");
        let mut stream = subscribe_stream(state.clone(), "cat".to_string());

        tx.send(ProgressUpdate::new(40, "Processing nodes (2/5)...")).unwrap();
        tx.send(ProgressUpdate::new(100, "Visualization data ready!")).unwrap();
        // Anything sent after completion is never delivered
        let _ = tx.send(ProgressUpdate::new(100, "late"));

        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stream_ends_when_channel_closes() {
        let state = test_state();
        let mut stream = subscribe_stream(state.clone(), "dog".to_string());

        // Visualize finished without a terminal event reaching us: the
        // registry drop closes the channel and the stream ends
        state.remove_progress("dog");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_slow_subscriber_skips_ahead() {
        let state = test_state();
        let tx = state.progress_sender("bird");
        let mut stream = subscribe_stream(state.clone(), "bird".to_string());

        // Overflow the channel before the subscriber polls at all
        for i in 0..150u32 {
            tx.send(ProgressUpdate::new((i % 100) as u8, "working")).unwrap();
        }
        tx.send(ProgressUpdate::new(100, "Visualization data ready!")).unwrap();

        let mut yielded = 0usize;
        while let Some(event) = stream.next().await {
            event.unwrap();
            yielded += 1;
        }
        // Lagged events were skipped, not replayed, and the stream still
        // terminated on the completion event
        assert!(yielded >= 1);
        assert!(yielded < 151);
    }

    #[tokio::test]
    async fn test_disconnected_subscribers_release_channels() {
        let state = test_state();
        for i in 0..1000 {
            let stream = subscribe_stream(state.clone(), format!("word{i}"));
            drop(stream);
        }
        assert_eq!(state.progress_channel_count(), 0);
    }

    #[tokio::test]
    async fn test_remaining_subscriber_keeps_channel() {
        let state = test_state();
        let first = subscribe_stream(state.clone(), "shared".to_string());
        let second = subscribe_stream(state.clone(), "shared".to_string());

        drop(second);
        assert_eq!(state.progress_channel_count(), 1);

        drop(first);
        assert_eq!(state.progress_channel_count(), 0);
    }
}
