use serde::{Deserialize, Serialize};

const OK_DISMISS_MS: u64 = 1200;
const ERROR_DISMISS_MS: u64 = 4500;

/// Short-lived message shown to the author after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flash {
    pub ok: bool,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Flash {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            dismiss_after_ms: OK_DISMISS_MS,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            dismiss_after_ms: ERROR_DISMISS_MS,
        }
    }
}

/// Body of every successful author action: a flash plus the updated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub flash: Flash,
    pub data: T,
}

impl<T> Outcome<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            flash: Flash::ok(message),
            data,
        }
    }
}
