use thiserror::Error;

pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Empty frame")]
    EmptyFrame,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing field `{field}` in {command} frame")]
    MissingField { command: String, field: String },

    #[error("Invalid value for `{field}`: {value}")]
    InvalidField { field: String, value: String },

    #[error("Malformed field: {0}")]
    MalformedField(String),

    #[error("Text is not valid percent-encoded UTF-8: {0}")]
    InvalidText(String),
}

impl ProtocolError {
    pub fn missing_field(command: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            command: command.into(),
            field: field.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
        }
    }
}
