// src/common/params.rs

use chrono::{DateTime, NaiveDate};
use validator::ValidationError;

// ---
// Helpers de parsing dos parâmetros de query.
// Tudo chega como texto; o que não converte vira ValidationError, que o
// handler junta no mesmo ValidationErrors das regras de range.
// ---

/// Valor em branco conta como ausente.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Inteiro opcional. Ausente => Ok(None); não numérico => Err.
pub fn parse_integer(raw: Option<&str>, field: &str) -> Result<Option<i64>, ValidationError> {
    let Some(value) = non_blank(raw) else {
        return Ok(None);
    };
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| invalid("integer", format!("{} debe ser un numero entero", field)))
}

/// Data obrigatória: `YYYY-MM-DD` ou um timestamp RFC 3339 (usa a data do calendário).
pub fn parse_required_date(raw: Option<&str>, field: &str) -> Result<NaiveDate, ValidationError> {
    let value = non_blank(raw)
        .ok_or_else(|| invalid("required", format!("Fecha \"{}\" requerida", field)))?;
    parse_date(value).ok_or_else(|| invalid("date", format!("Fecha \"{}\" invalida", field)))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Escapa os curingas do ILIKE para a busca ser uma substring literal.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
