use serde::Serialize;

/// Success envelope shared by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Failure envelope. `errors` is a single human readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub errors: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: message.into(),
        }
    }
}
