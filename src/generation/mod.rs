//! Provider calls folded into one uniform result shape.

pub mod bridge;
pub mod stream;

pub use bridge::GenerationBridge;
pub use stream::{collect_stream, Checkpoint, StreamAggregate, TokioYield, YIELD_EVERY};
