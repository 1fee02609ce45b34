//! Adapter implementations for interaction ports.

mod recording;

pub use recording::RecordingResponder;
