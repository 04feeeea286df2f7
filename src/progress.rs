// Progress reporting is an injectable observer, decoupled from the pure
// extraction pipeline so the core stays unit-testable without console
// output. Sinks are informational only: swapping or disabling one must
// never change the data the batch produces.

/// Receives human-readable progress messages from long-running operations.
pub trait ProgressSink {
    fn notify(&mut self, message: &str);
}

/// Forwards every message to the `log` facade at info level.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn notify(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// Discards every message. Used when verbosity is off and in tests.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn notify(&mut self, _message: &str) {}
}

/// Collects messages in memory so tests can assert on what was reported.
#[cfg(test)]
pub struct RecordingSink(pub Vec<String>);

#[cfg(test)]
impl ProgressSink for RecordingSink {
    fn notify(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}
