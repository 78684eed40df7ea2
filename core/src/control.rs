//! Start/stop control of the aggregator's update feed.
//!
//! The client does no I/O itself: it hands out [`ControlRequest`]s for the
//! caller's HTTP executor and folds the responses back into its local
//! belief about whether updates are running.

use crate::prelude::ControlError;
use crate::telemetry::{DiagnosticSink, LogSink};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCommand {
    Start,
    Stop,
}

impl ControlCommand {
    pub fn path(self) -> &'static str {
        match self {
            ControlCommand::Start => "/api/start",
            ControlCommand::Stop => "/api/stop",
        }
    }

    fn activates(self) -> bool {
        self == ControlCommand::Start
    }
}

/// A `POST` with no body that the caller should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    pub command: ControlCommand,
    pub url: String,
}

/// Status code of a completed call, or the reason it never completed.
pub type ControlResponse = Result<u16, ControlError>;

pub struct ControlClient<S: DiagnosticSink = LogSink> {
    endpoint: String,
    updates_active: bool,
    sink: S,
}

impl ControlClient<LogSink> {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_sink(endpoint, LogSink)
    }
}

impl<S: DiagnosticSink> ControlClient<S> {
    pub fn with_sink(endpoint: impl Into<String>, sink: S) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            updates_active: false,
            sink,
        }
    }

    pub fn start_updates(&self) -> ControlRequest {
        self.request(ControlCommand::Start)
    }

    pub fn stop_updates(&self) -> ControlRequest {
        self.request(ControlCommand::Stop)
    }

    /// Stop when updates are believed active, start otherwise.
    pub fn toggle(&self) -> ControlRequest {
        if self.updates_active {
            self.stop_updates()
        } else {
            self.start_updates()
        }
    }

    /// Folds a response into the activity flag. Any 2xx status counts as success;
    /// everything else leaves the flag alone and goes to the diagnostic sink.
    pub fn resolve(&mut self, command: ControlCommand, response: ControlResponse) -> bool {
        let outcome = match response {
            Ok(status) if (200..300).contains(&status) => Ok(()),
            Ok(status) => Err(ControlError::Status(status)),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(()) => {
                self.updates_active = command.activates();
                info!("{} acknowledged", command.path());
                true
            }
            Err(err) => {
                let context = match command {
                    ControlCommand::Start => "Failed to start live updates",
                    ControlCommand::Stop => "Failed to stop live updates",
                };
                self.sink.report(context, &err);
                false
            }
        }
    }

    pub fn updates_active(&self) -> bool {
        self.updates_active
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.updates_active {
            "Stop Updates"
        } else {
            "Start Updates"
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn request(&self, command: ControlCommand) -> ControlRequest {
        ControlRequest {
            command,
            url: format!("{}{}", self.endpoint, command.path()),
        }
    }
}
