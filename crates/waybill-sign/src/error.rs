#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("invalid signing key length")]
    InvalidKey,
}

pub type Result<T> = std::result::Result<T, SignError>;
