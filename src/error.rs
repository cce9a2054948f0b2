use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContrastError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContrastError {
    #[error("invalid hex color: {0:?}")]
    InvalidHexFormat(String),
    /// Only reachable through a bug in the luminance math; valid colors stay within [1, 21].
    #[error("contrast ratio {0} is outside the classifiable range [0, 22]")]
    UnclassifiableRatio(f64),
}
