use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro interno. Nunca vai direto para o cliente:
// os handlers convertem para ApiError com `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Linha do banco que não passou nas checagens de fronteira
    #[error("Linha inválida retornada pelo banco: {0}")]
    RowMappingError(String),

    // Query string ilegível (antes mesmo da validação dos campos)
    #[error("{0}")]
    InvalidQuery(String),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// O erro que de fato sai pela API: status + `{ "error": "..." }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl AppError {
    /// Converte para a resposta HTTP. Erros de validação viram 400 com todas
    /// as mensagens; o resto é logado e vira 500 com `fallback`, sem vazar detalhes.
    pub fn to_api_error(self, fallback: &str) -> ApiError {
        match self {
            AppError::ValidationError(errors) => ApiError {
                status: StatusCode::BAD_REQUEST,
                message: validation_message(&errors),
            },
            AppError::InvalidQuery(message) => ApiError {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            e => {
                tracing::error!(error = %e, "Erro Interno do Servidor");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: fallback.to_string(),
                }
            }
        }
    }
}

/// Junta as mensagens de todos os campos inválidos, ordenadas pelo nome do campo.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors
                .iter()
                .map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("{} invalido", field),
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(", ")
}
