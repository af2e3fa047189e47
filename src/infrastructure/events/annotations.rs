//! Annotation Event Sink
//!
//! Renders deploy progress as workflow-command notices so each step shows
//! up in the Actions run summary.

use std::cell::RefCell;
use std::io::{self, Write};

use crate::domain::ports::{DeployEvent, DeployEventSink, DeployStep};
use crate::ui::ci::CiLog;

/// Event sink that prints `::notice::` lines
pub struct AnnotationEventSink<W: Write> {
    log: RefCell<CiLog<W>>,
}

impl AnnotationEventSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> AnnotationEventSink<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            log: RefCell::new(CiLog::new(writer)),
        }
    }

    pub fn into_inner(self) -> W {
        self.log.into_inner().into_inner()
    }
}

impl<W: Write> DeployEventSink for AnnotationEventSink<W> {
    fn on_event(&self, event: DeployEvent) {
        let message = match event {
            DeployEvent::StepStarted { step } => match step {
                DeployStep::ComposePull => "Running docker compose pull...".to_string(),
                DeployStep::ComposeUp => "Running docker compose up -d...".to_string(),
                _ => return,
            },
            DeployEvent::StepCompleted { step, detail } => match step {
                DeployStep::Connect => format!("Connected to {}", detail),
                DeployStep::CreateEnvFile => return,
                DeployStep::TransferEnvFile => "Successfully transferred .env file".to_string(),
                DeployStep::TransferComposeFile => {
                    format!("Successfully transferred docker-compose file: {}", detail)
                }
                DeployStep::ValidateFiles => format!("Successfully validated files: {}", detail),
                DeployStep::ComposePull => {
                    format!("Successfully pulled Docker images:\n{}", detail)
                }
                DeployStep::ComposeUp => {
                    format!("Successfully started Docker containers:\n{}", detail)
                }
            },
        };
        self.log.borrow_mut().notice(&message);
    }
}
