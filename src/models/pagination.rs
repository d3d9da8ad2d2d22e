// src/models/pagination.rs

use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

// Entrada já convertida de texto para número, antes das regras de range.
#[derive(Debug, Default, Validate)]
pub struct PageInput {
    #[validate(range(min = 1, message = "page debe ser un entero mayor o igual a 1"))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100, message = "limit debe ser un entero entre 1 y 100"))]
    pub limit: Option<i64>,
}

/// Página já validada: `page >= 1`, `1 <= limit <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Só deve ser chamado depois de `PageInput::validate`.
    pub fn from_input(input: &PageInput) -> Self {
        Self {
            page: input.page.unwrap_or(DEFAULT_PAGE),
            limit: input.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, total: i64, params: PageParams) -> Self {
        Self {
            data,
            total,
            page: params.page,
            limit: params.limit,
            total_pages: total_pages(total, params.limit),
        }
    }
}
