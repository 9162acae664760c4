use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearchError>;

#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Research API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Research API returned no choices")]
    EmptyResponse,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
