//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables CI annotations, diagnostics, and recording in tests.

use std::fmt;

/// Pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    Connect,
    CreateEnvFile,
    TransferEnvFile,
    TransferComposeFile,
    ValidateFiles,
    ComposePull,
    ComposeUp,
}

impl DeployStep {
    pub const ALL: [DeployStep; 7] = [
        DeployStep::Connect,
        DeployStep::CreateEnvFile,
        DeployStep::TransferEnvFile,
        DeployStep::TransferComposeFile,
        DeployStep::ValidateFiles,
        DeployStep::ComposePull,
        DeployStep::ComposeUp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeployStep::Connect => "connect",
            DeployStep::CreateEnvFile => "create .env file",
            DeployStep::TransferEnvFile => "transfer .env file",
            DeployStep::TransferComposeFile => "transfer docker-compose file",
            DeployStep::ValidateFiles => "validate files",
            DeployStep::ComposePull => "docker compose pull",
            DeployStep::ComposeUp => "docker compose up",
        }
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// A long-running remote step began
    StepStarted { step: DeployStep },

    /// A step finished; `detail` names files or carries command output
    StepCompleted { step: DeployStep, detail: String },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - AnnotationEventSink: `::notice::` lines for the CI log
/// - NoopEventSink: Silent operation
pub trait DeployEventSink {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Test event sink that records all events
    struct RecordingEventSink {
        events: RefCell<Vec<DeployEvent>>,
    }

    impl DeployEventSink for RecordingEventSink {
        fn on_event(&self, event: DeployEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingEventSink {
            events: RefCell::new(Vec::new()),
        };
        sink.on_event(DeployEvent::StepStarted {
            step: DeployStep::ComposePull,
        });
        sink.on_event(DeployEvent::StepCompleted {
            step: DeployStep::ComposePull,
            detail: "pulled".to_string(),
        });
        assert_eq!(sink.events.borrow().len(), 2);
    }

    #[test]
    fn noop_sink_accepts_events() {
        NoopEventSink.on_event(DeployEvent::StepStarted {
            step: DeployStep::ComposeUp,
        });
    }

    #[test]
    fn steps_are_ordered() {
        assert_eq!(DeployStep::ALL[0], DeployStep::Connect);
        assert_eq!(DeployStep::ALL[6], DeployStep::ComposeUp);
        assert_eq!(DeployStep::ComposeUp.to_string(), "docker compose up");
    }
}
