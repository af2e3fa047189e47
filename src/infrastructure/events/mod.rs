//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - AnnotationEventSink: GitHub Actions `::notice::` lines

mod annotations;

pub use annotations::AnnotationEventSink;
