/// A monotonically increasing identifier for a log record. Recovery/ARIES
/// semantics that would make real use of this value are explicitly out of
/// scope; it exists so a `LogManager` implementation has something concrete
/// to flush up to.
pub type LogSequenceNumber = u64;

/// The write-ahead log collaborator consulted by a shard before it writes a
/// dirty page to disk (the WAL rule: log records describing a page's changes
/// must reach stable storage before the page itself does). Recovery is out
/// of scope for this crate; only the flush-before-write contract is modeled.
pub trait LogManager: std::fmt::Debug + Send + Sync {
    /// Flushes all log records up to and including `lsn` to stable storage.
    fn flush(&self, lsn: LogSequenceNumber);
}

/// The default collaborator: flushing is a no-op. A shard constructed
/// without an explicit `LogManager` skips the WAL step entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLogManager;

impl LogManager for NoOpLogManager {
    fn flush(&self, _lsn: LogSequenceNumber) {}
}
