use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("dial plan has no country codes")]
    EmptyCountryCodes,
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),
    #[error("invalid inserted digit: {0:?}")]
    InvalidInsertedDigit(char),
    #[error("invalid match suffix length: {0}")]
    InvalidSuffixLen(usize),
    #[error("invalid region: {0:?}")]
    InvalidRegion(String),
}
