// src/handlers/reports.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationErrors};

use crate::{
    common::{
        error::{ApiError, AppError},
        params::{non_blank, parse_integer, parse_required_date},
        query::FirstValueQuery,
    },
    config::AppState,
    models::{
        pagination::{PageInput, PageParams, PaginatedResult},
        reports::{CustomerValue, InventoryRisk, PaymentMix, SalesChannel, SalesDaily, TopProduct},
    },
};

// Mensagens fixas de 500: nunca carregam o erro de baixo
pub const CUSTOMERS_FAILURE: &str = "Error fetching customer value data";
pub const INVENTORY_FAILURE: &str = "Error fetching inventory risk data";
pub const PAYMENTS_FAILURE: &str = "Error fetching payment mix data";
pub const PRODUCTS_FAILURE: &str = "Error fetching top products";
pub const SALES_CHANNEL_FAILURE: &str = "Error fetching sales channel data";
pub const SALES_FAILURE: &str = "Error al obtener datos de ventas";

// =============================================================================
//  PARÂMETROS
//  Tudo chega como texto cru; a conversão e a validação acontecem no `parse`.
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Página (inteiro >= 1). Padrão: 1
    pub page: Option<String>,
    /// Itens por página (1 a 100). Padrão: 10
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn parse(&self) -> Result<PageParams, AppError> {
        let page = parse_integer(self.page.as_deref(), "page");
        let limit = parse_integer(self.limit.as_deref(), "limit");

        let input = PageInput {
            page: page.as_ref().ok().copied().flatten(),
            limit: limit.as_ref().ok().copied().flatten(),
        };

        // Erros de range (validator) e de tipo (parse) saem na mesma resposta
        let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Err(e) = page {
            errors.add("page", e);
        }
        if let Err(e) = limit {
            errors.add("limit", e);
        }

        if !errors.errors().is_empty() {
            return Err(AppError::ValidationError(errors));
        }
        Ok(PageParams::from_input(&input))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    /// Página (inteiro >= 1). Padrão: 1
    pub page: Option<String>,
    /// Itens por página (1 a 100). Padrão: 10
    pub limit: Option<String>,
    /// Busca livre pelo nome do produto
    pub q: Option<String>,
}

impl ProductsQuery {
    pub fn parse(&self) -> Result<(PageParams, Option<String>), AppError> {
        let page = PaginationQuery {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
        .parse()?;
        let search = non_blank(self.q.as_deref()).map(str::to_string);
        Ok((page, search))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesQuery {
    /// Data inicial (YYYY-MM-DD), inclusiva
    pub from: Option<String>,
    /// Data final (YYYY-MM-DD), inclusiva
    pub to: Option<String>,
}

impl SalesQuery {
    pub fn parse(&self) -> Result<(NaiveDate, NaiveDate), AppError> {
        let from = parse_required_date(self.from.as_deref(), "from");
        let to = parse_required_date(self.to.as_deref(), "to");

        match (from, to) {
            (Ok(from), Ok(to)) => Ok((from, to)),
            (from, to) => {
                let mut errors = ValidationErrors::new();
                if let Err(e) = from {
                    errors.add("from", e);
                }
                if let Err(e) = to {
                    errors.add("to", e);
                }
                Err(AppError::ValidationError(errors))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Nome da categoria (sem diferenciar maiúsculas)
    pub category: Option<String>,
}

impl InventoryQuery {
    pub fn parse(&self) -> Option<String> {
        non_blank(self.category.as_deref()).map(str::to_string)
    }
}

// =============================================================================
//  HANDLERS
// =============================================================================

// GET /api/reports/customers
#[utoipa::path(
    get,
    path = "/api/reports/customers",
    tag = "Reports",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Clientes por valor gasto", body = PaginatedResult<CustomerValue>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_customers(
    State(app_state): State<AppState>,
    FirstValueQuery(query): FirstValueQuery<PaginationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = query
        .parse()
        .map_err(|e| e.to_api_error(CUSTOMERS_FAILURE))?;

    let result = app_state
        .reports_service
        .customer_value(page)
        .await
        .map_err(|e| e.to_api_error(CUSTOMERS_FAILURE))?;

    Ok((StatusCode::OK, Json(result)))
}

// GET /api/reports/inventory
#[utoipa::path(
    get,
    path = "/api/reports/inventory",
    tag = "Reports",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Risco de estoque por produto", body = Vec<InventoryRisk>),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_inventory(
    State(app_state): State<AppState>,
    FirstValueQuery(query): FirstValueQuery<InventoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let category = query.parse();

    let rows = app_state
        .reports_service
        .inventory_risk(category.as_deref())
        .await
        .map_err(|e| e.to_api_error(INVENTORY_FAILURE))?;

    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/reports/payments
#[utoipa::path(
    get,
    path = "/api/reports/payments",
    tag = "Reports",
    responses(
        (status = 200, description = "Participação de cada método de pagamento", body = Vec<PaymentMix>),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_payments(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .reports_service
        .payment_mix()
        .await
        .map_err(|e| e.to_api_error(PAYMENTS_FAILURE))?;

    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/reports/products
#[utoipa::path(
    get,
    path = "/api/reports/products",
    tag = "Reports",
    params(ProductsQuery),
    responses(
        (status = 200, description = "Produtos mais vendidos", body = PaginatedResult<TopProduct>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_products(
    State(app_state): State<AppState>,
    FirstValueQuery(query): FirstValueQuery<ProductsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (page, search) = query
        .parse()
        .map_err(|e| e.to_api_error(PRODUCTS_FAILURE))?;

    let result = app_state
        .reports_service
        .top_products(page, search.as_deref())
        .await
        .map_err(|e| e.to_api_error(PRODUCTS_FAILURE))?;

    Ok((StatusCode::OK, Json(result)))
}

// GET /api/reports/sales-channel
#[utoipa::path(
    get,
    path = "/api/reports/sales-channel",
    tag = "Reports",
    responses(
        (status = 200, description = "Vendas agregadas por canal", body = Vec<SalesChannel>),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_sales_channel(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .reports_service
        .sales_channels()
        .await
        .map_err(|e| e.to_api_error(SALES_CHANNEL_FAILURE))?;

    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/reports/sales
#[utoipa::path(
    get,
    path = "/api/reports/sales",
    tag = "Reports",
    params(SalesQuery),
    responses(
        (status = 200, description = "Vendas diárias por canal no intervalo", body = Vec<SalesDaily>),
        (status = 400, description = "Datas ausentes ou inválidas"),
        (status = 500, description = "Falha no banco")
    )
)]
pub async fn get_sales(
    State(app_state): State<AppState>,
    FirstValueQuery(query): FirstValueQuery<SalesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (from, to) = query.parse().map_err(|e| e.to_api_error(SALES_FAILURE))?;

    let rows = app_state
        .reports_service
        .sales_daily(from, to)
        .await
        .map_err(|e| e.to_api_error(SALES_FAILURE))?;

    Ok((StatusCode::OK, Json(rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::validation_message;

    fn pagination(page: Option<&str>, limit: Option<&str>) -> PaginationQuery {
        PaginationQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::ValidationError(errors) => validation_message(&errors),
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
    }

    #[test]
    fn unset_pagination_uses_defaults() {
        assert_eq!(pagination(None, None).parse().unwrap(), PageParams { page: 1, limit: 10 });
        assert_eq!(
            pagination(Some(""), Some(" ")).parse().unwrap(),
            PageParams { page: 1, limit: 10 }
        );
    }

    #[test]
    fn limit_bounds_are_enforced() {
        for bad in ["0", "101", "-5"] {
            let msg = message(pagination(None, Some(bad)).parse().unwrap_err());
            assert_eq!(msg, "limit debe ser un entero entre 1 y 100");
        }
        assert_eq!(pagination(None, Some("100")).parse().unwrap().limit, 100);
        assert_eq!(pagination(None, Some("1")).parse().unwrap().limit, 1);
    }

    #[test]
    fn non_numeric_limit_mentions_the_field() {
        let msg = message(pagination(None, Some("diez")).parse().unwrap_err());
        assert_eq!(msg, "limit debe ser un numero entero");
    }

    #[test]
    fn every_violation_is_listed() {
        let msg = message(pagination(Some("0"), Some("abc")).parse().unwrap_err());
        assert_eq!(
            msg,
            "limit debe ser un numero entero, page debe ser un entero mayor o igual a 1"
        );
    }

    #[test]
    fn product_search_is_trimmed_and_optional() {
        let query = ProductsQuery {
            page: Some("2".into()),
            limit: None,
            q: Some("  coffee ".into()),
        };
        let (page, search) = query.parse().unwrap();
        assert_eq!(page, PageParams { page: 2, limit: 10 });
        assert_eq!(search.as_deref(), Some("coffee"));

        let (_, search) = ProductsQuery { q: Some("".into()), ..Default::default() }
            .parse()
            .unwrap();
        assert_eq!(search, None);
    }

    #[test]
    fn sales_dates_are_required() {
        let msg = message(SalesQuery::default().parse().unwrap_err());
        assert_eq!(msg, "Fecha \"from\" requerida, Fecha \"to\" requerida");
    }

    #[test]
    fn sales_dates_must_parse() {
        let query = SalesQuery {
            from: Some("2024-01-01".into()),
            to: Some("31/01/2024".into()),
        };
        assert_eq!(message(query.parse().unwrap_err()), "Fecha \"to\" invalida");
    }

    #[test]
    fn reversed_range_is_not_a_validation_error() {
        let query = SalesQuery {
            from: Some("2024-02-01".into()),
            to: Some("2024-01-01".into()),
        };
        assert!(query.parse().is_ok());
    }

    #[test]
    fn blank_category_means_no_filter() {
        assert_eq!(InventoryQuery { category: Some(" ".into()) }.parse(), None);
        assert_eq!(
            InventoryQuery { category: Some("Bebidas".into()) }.parse().as_deref(),
            Some("Bebidas")
        );
    }
}
