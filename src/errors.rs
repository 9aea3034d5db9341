use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Http(reqwest::Error),
    Sparql(String),
    Provider(String),
    Ftp(suppaftp::FtpError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Template(askama::Error),
    Pattern(regex::Error),
    Blocking(String),
    /// Nothing to publish for the requested meeting or agenda.
    MissingData(String),
    BadRequest(String),
}

/// Body of every error response: `{"title": ..., "detail": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub title: String,
    pub detail: String,
}

impl AppError {
    fn title(&self) -> &'static str {
        match self {
            AppError::Http(_) => "HTTP request failed",
            AppError::Sparql(_) => "Triple store query failed",
            AppError::Provider(_) => "Mail campaign provider error",
            AppError::Ftp(_) => "FTP transfer failed",
            AppError::Io(_) => "File system error",
            AppError::Json(_) => "Malformed JSON",
            AppError::Template(_) => "Template rendering failed",
            AppError::Pattern(_) => "Invalid pattern",
            AppError::Blocking(_) => "Background task failed",
            AppError::MissingData(_) => "Missing data",
            AppError::BadRequest(_) => "Bad request",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Http(e) => write!(f, "HTTP error: {e}"),
            AppError::Sparql(e) => write!(f, "SPARQL error: {e}"),
            AppError::Provider(e) => write!(f, "Mailchimp error: {e}"),
            AppError::Ftp(e) => write!(f, "FTP error: {e}"),
            AppError::Io(e) => write!(f, "IO error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Pattern(e) => write!(f, "Regex error: {e}"),
            AppError::Blocking(e) => write!(f, "Blocking task error: {e}"),
            AppError::MissingData(e) => write!(f, "Missing data: {e}"),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingData(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }
        HttpResponse::build(status).json(ApiErrorResponse {
            title: self.title().to_string(),
            detail: self.to_string(),
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Http(e)
    }
}

impl From<suppaftp::FtpError> for AppError {
    fn from(e: suppaftp::FtpError) -> Self {
        AppError::Ftp(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<regex::Error> for AppError {
    fn from(e: regex::Error) -> Self {
        AppError::Pattern(e)
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Blocking(e.to_string())
    }
}
