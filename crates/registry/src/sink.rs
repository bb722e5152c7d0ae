//! Event sink port and its bundled implementations.
//!
//! The registry never writes its audit trail directly; it hands each event
//! to an injected [`EventSink`] immediately after the mutation commits,
//! while the state write lock is still held, so sink order equals commit
//! order. Emission is fire-and-forget: sinks return nothing and must not
//! block the caller on acknowledgment.

use std::io::Write;

use parking_lot::Mutex;

use rollbook_types::RegistryEvent;

/// Append-only output channel for audit events.
///
/// Implementations must be cheap and non-blocking; the registry emits while
/// holding its write lock.
pub trait EventSink: Send + Sync {
    /// Accepts one event. No acknowledgment, no error channel.
    fn emit(&self, event: &RegistryEvent);
}

/// Captures events in memory, in emission order.
///
/// The test-facing twin of a durable sink: harnesses assert on captured
/// events independently of state assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RegistryEvent>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    /// Drains and returns everything emitted so far.
    pub fn take(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &RegistryEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Writes each event as one JSON line to an `io::Write` channel.
///
/// Suitable for append-only log files or pipes consumed by indexers. Write
/// failures are logged and dropped: the mutation has already committed and
/// the contract carries no acknowledgment.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wraps a writer. Each event is written as `<json>\n` and flushed.
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Unwraps the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> EventSink for WriterSink<W> {
    fn emit(&self, event: &RegistryEvent) {
        let mut writer = self.writer.lock();
        let line = event.to_json();
        if let Err(e) = writer.write_all(line.as_bytes()).and_then(|()| writer.write_all(b"\n"))
        {
            tracing::warn!(event = event.name(), error = %e, "audit event write failed");
            return;
        }
        if let Err(e) = writer.flush() {
            tracing::warn!(event = event.name(), error = %e, "audit event flush failed");
        }
    }
}

/// Discards every event. For hosts that index state directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &RegistryEvent) {}
}
