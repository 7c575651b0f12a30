use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Invalid bot token")]
    InvalidToken,
}

pub type Result<T> = std::result::Result<T, SlackError>;
