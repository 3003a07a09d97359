use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A network or matrix was described with an impossible shape or hyperparameter.
    InvalidConfiguration(String),
    /// A vector (or collection of vectors) does not have the length the network expects.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    InvalidData(String),
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Error::DimensionMismatch {
            what,
            expected,
            got,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Error::DimensionMismatch {
                what,
                expected,
                got,
            } => write!(
                f,
                "dimension mismatch: {what} has len {got}, expected {expected}"
            ),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_the_offending_vector() {
        let err = Error::mismatch("input", 2, 3);
        assert_eq!(
            err.to_string(),
            "dimension mismatch: input has len 3, expected 2"
        );
    }
}
