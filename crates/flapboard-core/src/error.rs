/// Result alias that carries the [`ConfigError`] type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced while parsing raw configuration attributes.
///
/// None of these are fatal: [`crate::BoardConfig::from_attributes`] logs them
/// and substitutes the documented default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name}: empty value")]
    Empty { name: &'static str },
    #[error("{name}: {value:?} is not a number")]
    NotANumber { name: &'static str, value: String },
    #[error("{name}: {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
