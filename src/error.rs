pub type SiteResult<T> = Result<T, SiteError>;

#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error("config error: {0}")]
    Config(String),

    #[error("dom error: {0}")]
    Dom(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("timer error: {0}")]
    Timer(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SiteError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn timer(msg: impl Into<String>) -> Self {
        Self::Timer(msg.into())
    }
}
