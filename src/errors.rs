use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use crate::models::nav_item::MenuError;

#[derive(Debug)]
pub enum AppError {
    NotFound,
    Validation(Vec<String>),
    Config(String),
    Seed(serde_json::Error),
    Menu(MenuError),
    Lock,
}

/// JSON body for every error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors.join("; ")),
            AppError::Config(e) => write!(f, "Config error: {e}"),
            AppError::Seed(e) => write!(f, "Seed data error: {e}"),
            AppError::Menu(e) => write!(f, "{e}"),
            AppError::Lock => write!(f, "Page store lock poisoned"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound => ApiErrorResponse {
                error: "Not found".to_string(),
                details: None,
            },
            AppError::Validation(errors) => ApiErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.join("; ")),
            },
            _ => {
                log::error!("{self}");
                ApiErrorResponse {
                    error: "Internal server error".to_string(),
                    details: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Seed(e)
    }
}

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        AppError::Menu(e)
    }
}
