use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use store::StoreError;
use thiserror::Error;

use crate::web::html;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Submission is missing required fields")]
    MissingFields,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Unable to save withdrawal: {0}")]
    SaveFailed(StoreError),
    #[error("Unable to delete withdrawal: {0}")]
    DeleteFailed(StoreError),
}

impl Error {
    /// Status code and the message shown to the client. Store details stay in the log.
    pub fn client_status_and_error(&self) -> (StatusCode, &'static str) {
        match self {
            Error::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            Error::WrongPassword => (StatusCode::UNAUTHORIZED, "Incorrect password"),
            Error::SaveFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to process withdrawal")
            },
            Error::DeleteFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting withdrawal record")
            },
        }
    }

    fn log(&self) {
        match self {
            Error::SaveFailed(_) | Error::DeleteFailed(_) => log::error!("{self}"),
            _ => log::warn!("{self}"),
        }
    }
}

/// JSON body `{"error": ...}` for the API routes.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.log();
        let (status, message) = self.client_status_and_error();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Same errors rendered as a page for the browser routes.
#[derive(Debug)]
pub struct HtmlError(pub Error);

impl From<Error> for HtmlError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        self.0.log();
        let (status, message) = self.0.client_status_and_error();
        let page = match self.0 {
            Error::WrongPassword => html::login_page(Some(message)),
            _ => html::error_page(message),
        };
        (status, Html(page)).into_response()
    }
}
