pub type Result<T, E = LibraryError> = std::result::Result<T, E>;

/// Failure while writing or loading a shader library
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    #[error("unexpected end of library data: needed {needed} bytes but only {remaining} remain")]
    Truncated { needed: u64, remaining: usize },

    #[error("invalid value {value} for {field}")]
    InvalidTag { field: &'static str, value: i32 },

    #[error("invalid boolean value {value} for {field}")]
    InvalidBool { field: &'static str, value: u8 },

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("{0} unexpected bytes after the last shader entry")]
    TrailingBytes(usize),

    #[error("too many {0} to encode")]
    TooMany(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
