use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("background asset not found: {0}")]
    AssetNotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
