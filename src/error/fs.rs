//! File system errors

use super::NodefetchError;

pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> NodefetchError {
    NodefetchError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> NodefetchError {
    NodefetchError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
