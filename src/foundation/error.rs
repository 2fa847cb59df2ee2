pub type GaugeResult<T> = Result<T, GaugeError>;

#[derive(thiserror::Error, Debug)]
pub enum GaugeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error at state {index}: {message}")]
    Encode { index: u32, message: String },

    #[error("archive error: {0}")]
    Archive(String),

    #[error("export cancelled after {completed} of {total} states")]
    Cancelled { completed: u32, total: u32 },

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GaugeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(index: u32, msg: impl Into<String>) -> Self {
        Self::Encode {
            index,
            message: msg.into(),
        }
    }

    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GaugeError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}
