use chess::{CodecError, FenError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine refused a position; the message is the engine's own.
    #[error("{0}")]
    PositionRejected(String),
    #[error("Engine broke the linear board contract: {0}")]
    MalformedBoard(#[from] CodecError),
    #[error("Cannot start engine: {0}")]
    Startup(#[from] FenError),
}
