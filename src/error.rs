use std::fmt;

/// Crate-wide error type for everything outside the validated-graph core.
///
/// The relaxation engine itself assumes a validated graph; these
/// variants are reachable from the parser, or from programmer errors if the
/// `GraphStore`/`MetricRegistry` invariants are ever violated by hand.
#[derive(Debug)]
pub enum EngineError {
    Io(std::io::Error),
    Parse { line: usize, message: String },
    UnknownNode(String),
    MissingEdge { src: String, dst: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Io(e) => write!(f, "I/O error: {}", e),
            EngineError::Parse { line, message } => write!(f, "line {}: {}", line, message),
            EngineError::UnknownNode(name) => write!(f, "unknown node \"{}\"", name),
            EngineError::MissingEdge { src, dst } => {
                write!(f, "no declared edge {} -> {}", src, dst)
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
