//! Channel for recoverable compilation anomalies.
//!
//! Every anomaly the compiler works around is reported as one human readable
//! line through a [`WarningSink`]. Callers pick the sink: a closure, a
//! `Vec<String>` that collects messages, or [`TracingSink`] which forwards to
//! the `tracing` subscriber.

use tracing::warn;

/// Receives one message per recoverable anomaly.
pub trait WarningSink {
    fn warn(&mut self, message: &str);
}

impl<F> WarningSink for F
where
    F: FnMut(&str),
{
    fn warn(&mut self, message: &str) {
        self(message)
    }
}

impl WarningSink for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&mut self, message: &str) {
        warn!(target: "guideflow_bpmn", "{}", message);
    }
}

/// Wraps the caller's sink and keeps the tallies needed for strict mode.
pub(crate) struct Diagnostics<'s> {
    sink: &'s mut dyn WarningSink,
    count: usize,
    first: Option<String>,
}

impl<'s> Diagnostics<'s> {
    pub(crate) fn new(sink: &'s mut dyn WarningSink) -> Self {
        Self {
            sink,
            count: 0,
            first: None,
        }
    }

    pub(crate) fn warn(&mut self, message: String) {
        self.count += 1;
        self.sink.warn(&message);
        if self.first.is_none() {
            self.first = Some(message);
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_receive_messages() {
        let mut seen = Vec::new();
        let mut sink = |message: &str| seen.push(message.len());
        sink.warn("abc");
        sink.warn("de");
        assert_eq!(seen, vec![3, 2]);
    }

    #[test]
    fn diagnostics_count_and_remember_first_message() {
        let mut collected: Vec<String> = Vec::new();
        let mut diagnostics = Diagnostics::new(&mut collected);
        assert_eq!(diagnostics.first(), None);

        diagnostics.warn("first".into());
        diagnostics.warn("second".into());

        assert_eq!(diagnostics.count(), 2);
        assert_eq!(diagnostics.first(), Some("first"));
        drop(diagnostics);
        assert_eq!(collected, vec!["first".to_string(), "second".to_string()]);
    }
}
