//! Configuration errors

use super::NodefetchError;

pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> NodefetchError {
    NodefetchError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> NodefetchError {
    NodefetchError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn invalid(message: impl Into<String>) -> NodefetchError {
    NodefetchError::ConfigInvalid {
        message: message.into(),
    }
}
