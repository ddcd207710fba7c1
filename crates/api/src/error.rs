use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvtaleError {
    #[error("Internal server error")]
    InternalError,
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid method")]
    InvalidMethod,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl actix_web::error::ResponseError for AvtaleError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
        })
    }
}
