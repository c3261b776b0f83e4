use thiserror::Error;

/// Invalid transformer configuration.
///
/// Raised while a transformer is being constructed, never deferred to
/// `fit` or `transform`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("incorrect {name}: '{value}'. The valid values are: 'ignore', 'raise', 'warn'")]
    InvalidPolicy { name: &'static str, value: String },

    #[error("column name for '{argument}' must not be empty")]
    EmptyColumnName { argument: &'static str },

    #[error("unknown argument '{argument}' for {kind}")]
    UnknownArgument { kind: String, argument: String },

    #[error("invalid value for argument '{argument}' of {kind}: {reason}")]
    InvalidArgument {
        kind: String,
        argument: String,
        reason: String,
    },

    #[error("unknown transformer kind: '{0}'")]
    UnknownTransformer(String),

    #[error("unknown data type: '{0}'")]
    UnknownDataType(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
