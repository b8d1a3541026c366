use std::io::Write;

/// Receives raw output chunks as the backend produces them, independently of
/// the buffering done for parsing.
pub trait ChunkObserver: Send + Sync {
    fn on_chunk(&self, chunk: &str);
}

/// Mirrors chunks to stderr for debugging. Do not try to parse this stderr.
pub struct StderrObserver;

impl ChunkObserver for StderrObserver {
    fn on_chunk(&self, chunk: &str) {
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(chunk.as_bytes());
        let _ = stderr.flush();
    }
}

/// Discards chunks. Used by tests.
pub struct NullObserver;

impl ChunkObserver for NullObserver {
    fn on_chunk(&self, _chunk: &str) {}
}
