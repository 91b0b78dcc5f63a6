/// Error type for command parsing, placement, and world operations.
#[derive(Debug, thiserror::Error)]
pub enum HolodeckError {
    #[error("Invalid syntax: {0}")]
    Syntax(String),
    #[error("Invalid block specification: {0}")]
    BlockValidation(String),
    #[error("World operation failed: {0}")]
    WorldOperation(String),
    #[error("Placement failed: {0}")]
    Placement(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HolodeckError>;
