use thiserror::Error;

/// Failures surfaced by storage backends and blob codecs.
///
/// The store itself never propagates these to callers of mutating
/// operations; they are logged and the in-memory state stays authoritative
/// until the next successful write.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("serialization failure: {0}")]
    Serde(String),
    #[error("storage backend failure: {0}")]
    Storage(String),
}
