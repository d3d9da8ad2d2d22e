// src/common/query.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::common::error::{ApiError, AppError};

/// Query string em que chave repetida não é erro: vale a primeira ocorrência
/// (`?limit=5&limit=500` => `limit = 5`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstValueQuery<T>(pub T);

/// Query string que nem chegou a ser lida. Sai como `{ "error": ... }` com 400.
#[derive(Debug)]
pub struct QueryError(pub String);

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: self.0,
        }
        .into_response()
    }
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::InvalidQuery(e.0)
    }
}

/// Reduz os pares a um objeto com o primeiro valor de cada chave.
pub fn first_values(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }
    fields
}

impl<T, S> FromRequestParts<S> for FirstValueQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = QueryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| QueryError(format!("Parametros de consulta invalidos: {}", e.body_text())))?;

        serde_json::from_value(Value::Object(first_values(pairs)))
            .map(FirstValueQuery)
            .map_err(|e| QueryError(format!("Parametros de consulta invalidos: {}", e)))
    }
}
