//! Folding a provider delta stream into buffered text.

use async_trait::async_trait;
use futures::StreamExt;
use tracing::trace;

use crate::error::UiForgeError;
use crate::types::{DeltaStream, FinishReason, Usage};

/// Fragments consumed between two cooperative checkpoints.
pub const YIELD_EVERY: usize = 100;

/// Scheduler hook awaited while draining long streams.
///
/// Lets a large generation hand control back to the runtime so concurrent
/// requests keep making progress. It must not reorder or drop fragments.
#[async_trait]
pub trait Checkpoint: Send + Sync {
    /// Called after `fragments` fragments have been appended.
    async fn checkpoint(&self, fragments: usize);
}

/// Default checkpoint: yield the current task back to tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioYield;

#[async_trait]
impl Checkpoint for TokioYield {
    async fn checkpoint(&self, fragments: usize) {
        trace!(fragments, "yielding to scheduler");
        tokio::task::yield_now().await;
    }
}

/// Result of draining a delta stream.
#[derive(Debug, Clone, Default)]
pub struct StreamAggregate {
    pub text: String,
    pub usage: Usage,
    pub fragment_count: usize,
    pub finish_reason: Option<FinishReason>,
}

/// Drain a stream, appending fragments in arrival order.
///
/// Awaits `checkpoint` after every `yield_every`-th fragment. The first error
/// aborts the fold and the partial text is dropped with it.
pub async fn collect_stream(
    mut stream: DeltaStream,
    checkpoint: &dyn Checkpoint,
    yield_every: usize,
) -> Result<StreamAggregate, UiForgeError> {
    let yield_every = yield_every.max(1);
    let mut aggregate = StreamAggregate::default();

    while let Some(delta) = stream.next().await {
        let delta = delta?;
        if delta.is_fragment() {
            aggregate.text.push_str(&delta.text);
            aggregate.fragment_count += 1;
            if aggregate.fragment_count % yield_every == 0 {
                checkpoint.checkpoint(aggregate.fragment_count).await;
            }
        }
        if let Some(u) = delta.usage {
            aggregate.usage.absorb(&u);
        }
        if let Some(fr) = delta.finish_reason {
            aggregate.finish_reason = Some(fr);
        }
    }

    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextStreamDelta;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting(AtomicUsize);

    #[async_trait]
    impl Checkpoint for Counting {
        async fn checkpoint(&self, _fragments: usize) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn stream_of(deltas: Vec<Result<TextStreamDelta, UiForgeError>>) -> DeltaStream {
        Box::pin(futures::stream::iter(deltas))
    }

    #[tokio::test]
    async fn usage_only_events_are_not_fragments() {
        let stream = stream_of(vec![
            Ok(TextStreamDelta::usage(Usage {
                input_tokens: 5,
                ..Default::default()
            })),
            Ok(TextStreamDelta::text("a")),
            Ok(TextStreamDelta::text("")),
            Ok(TextStreamDelta::text("b")),
            Ok(TextStreamDelta::done(
                Some(FinishReason::Stop),
                Some(Usage {
                    output_tokens: 2,
                    ..Default::default()
                }),
            )),
        ]);

        let aggregate = collect_stream(stream, &TokioYield, YIELD_EVERY).await.unwrap();

        assert_eq!(aggregate.text, "ab");
        assert_eq!(aggregate.fragment_count, 2);
        assert_eq!(aggregate.usage.total_tokens, 7);
        assert_eq!(aggregate.finish_reason, Some(FinishReason::Stop));
    }

    #[tokio::test]
    async fn checkpoint_fires_on_each_multiple() {
        let deltas = (0..10).map(|i| Ok(TextStreamDelta::text(i.to_string()))).collect();
        let counting = Counting::default();

        let aggregate = collect_stream(stream_of(deltas), &counting, 3).await.unwrap();

        assert_eq!(aggregate.text, "0123456789");
        assert_eq!(counting.0.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn error_discards_partial_text() {
        let stream = stream_of(vec![
            Ok(TextStreamDelta::text("partial")),
            Err(UiForgeError::Stream("connection reset".into())),
        ]);

        let err = collect_stream(stream, &TokioYield, YIELD_EVERY).await.unwrap_err();

        assert!(err.to_string().contains("connection reset"));
    }
}
