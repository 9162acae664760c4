use thiserror::Error;

pub type Result<T> = std::result::Result<T, PageExtractError>;

#[derive(Error, Debug)]
pub enum PageExtractError {
    #[error("URL is not fetchable: {0}")]
    BadUrl(String),

    #[error("Page fetch failed ({status})")]
    Status { status: u16 },

    #[error("Page produced no extractable content")]
    EmptyContent,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
