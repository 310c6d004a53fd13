use thiserror::Error;

#[derive(Error, Debug)]
pub enum UrbainError {
    #[error("Search error: {0}")]
    SearchError(#[from] crate::search::SearchError),
    #[error("Store error: {0}")]
    StoreError(#[from] crate::store::StoreError),
    #[error("Invalid place: {0}")]
    PlaceForm(#[from] crate::core::PlaceFormError),
    #[error("Data error: {0}")]
    Data(#[from] urbain_data::DataError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, UrbainError>;
