use std::sync::Mutex;

/// A line-oriented diagnostic output channel.
///
/// The interception layer's only output obligation is to hand well-formed single-line
/// messages to a sink; where those lines go is the sink's concern. Sinks are injected
/// into the [`crate::weaver::Weaver`] at construction and shared behind `Arc`, so an
/// implementation must tolerate concurrent writes; the interception layer does not
/// serialize output across threads.
pub trait TraceSink: Send + Sync {
    /// Emits one trace line
    fn write_line(&self, line: &str);
}

/// A sink that forwards every line to the `tracing` facade at trace level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing-backed sink
    #[must_use]
    pub fn new() -> Self {
        TracingSink
    }
}

impl TraceSink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::trace!(target: "callscope", "{}", line);
    }
}

/// A sink that captures every line in memory.
///
/// Useful wherever emitted lines need to be inspected after the fact, most of all in
/// tests asserting on the exact trace output of an invocation.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    /// Creates an empty buffering sink
    #[must_use]
    pub fn new() -> Self {
        BufferSink::default()
    }

    /// Returns a snapshot of the captured lines, in emission order
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        lock!(self.lines).clone()
    }

    /// Discards all captured lines
    pub fn clear(&self) {
        lock!(self.lines).clear();
    }
}

impl TraceSink for BufferSink {
    fn write_line(&self, line: &str) {
        lock!(self.lines).push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_captures_in_order() {
        let sink = BufferSink::new();
        sink.write_line("Entering Point.X.get()");
        sink.write_line("Exiting Point.X.get() with result 3");
        assert_eq!(
            sink.lines(),
            vec![
                "Entering Point.X.get()".to_string(),
                "Exiting Point.X.get() with result 3".to_string(),
            ]
        );
    }

    #[test]
    fn test_buffer_sink_clear() {
        let sink = BufferSink::new();
        sink.write_line("Entering Point.Point()");
        sink.clear();
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_tracing_sink_is_silent_without_subscriber() {
        // No subscriber installed; emitting must not panic.
        let sink = TracingSink::new();
        sink.write_line("Entering Point.Point()");
    }
}
