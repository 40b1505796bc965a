pub type SlitscanResult<T> = Result<T, SlitscanError>;

#[derive(thiserror::Error, Debug)]
pub enum SlitscanError {
    #[error("invalid geometry: {0}")]
    Geometry(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("frame source error: {0}")]
    Source(String),

    #[error("image sink error: {0}")]
    Sink(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlitscanError {
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}
