//! Error kinds raised by author actions.
//!
//! Every variant is recoverable: the triggering action fails with a flash
//! message and the widget state stays exactly as it was before the action.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use common::model::flash::Flash;
use log::warn;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// Required author input is missing or inconsistent.
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    /// Network or transport failure, or a non-2xx CSV download.
    #[error("Fetch failed: {0}")]
    Fetch(String),
    /// A CSV endpoint answered with an HTML page, usually a login redirect.
    #[error("CSV not accessible. Publish the tab as CSV (or use /export?format=csv&gid=).")]
    HtmlResponse,
    #[error("Headers JSON is invalid: {0}")]
    HeadersJson(String),
    #[error("Body JSON is invalid: {0}")]
    BodyJson(String),
    #[error("API request failed: {0}")]
    ApiHttp(u16),
    #[error("API did not return JSON: {0}")]
    ApiJson(String),
    #[error("Row path \"{0}\" did not resolve to an array")]
    RowPath(String),
    /// No credential for a protected request.
    #[error("{0}")]
    Auth(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WidgetError {
    pub fn row_path(path: &str) -> Self {
        if path.is_empty() {
            WidgetError::RowPath("(root)".to_string())
        } else {
            WidgetError::RowPath(path.to_string())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WidgetError::Validation(_)
            | WidgetError::HeadersJson(_)
            | WidgetError::BodyJson(_) => StatusCode::BAD_REQUEST,
            WidgetError::NotFound(_) => StatusCode::NOT_FOUND,
            WidgetError::Auth(_) => StatusCode::UNAUTHORIZED,
            WidgetError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WidgetError::Fetch(_)
            | WidgetError::HtmlResponse
            | WidgetError::ApiHttp(_)
            | WidgetError::ApiJson(_)
            | WidgetError::RowPath(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<rusqlite::Error> for WidgetError {
    fn from(err: rusqlite::Error) -> Self {
        WidgetError::Storage(err.to_string())
    }
}

/// Turns a failed action into the error flash returned to the author.
pub fn error_response(err: &WidgetError) -> HttpResponse {
    warn!("action failed: {}", err);
    HttpResponse::build(err.status()).json(Flash::error(err.to_string()))
}
