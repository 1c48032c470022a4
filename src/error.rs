use thiserror::Error;

pub type ViewResult<T> = Result<T, ViewError>;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("invalid span presets: {0}")]
    InvalidPresets(String),

    #[error("invalid view config: {0}")]
    InvalidConfig(String),

    #[error("series source failed: {0}")]
    Source(String),
}
