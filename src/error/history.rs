//! Download history errors

use super::NodefetchError;

pub fn failed(message: impl Into<String>) -> NodefetchError {
    NodefetchError::HistoryFailed {
        message: message.into(),
    }
}
