use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::auth::ExpiryStatus;

pub const SERVER_ERROR_MESSAGE: &str = "Server error";

// Erros da API, convertidos em resposta HTTP na borda do handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Token expirado")]
    AuthExpired(ExpiryStatus),

    #[error("Token inválido ou ausente")]
    InvalidToken,

    #[error("{0}")]
    BadRequest(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

// Query string malformada vira 400 no mesmo formato `{message}`.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // O payload de expiração vai para o cliente sem alteração.
            AppError::AuthExpired(status) => {
                return (StatusCode::FORBIDDEN, Json(status)).into_response();
            }
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "One or more query parameters are invalid",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or missing authentication token".to_string(),
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),

            // Banco e erros inesperados: detalhe só no log, nunca na resposta.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE.to_string())
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
