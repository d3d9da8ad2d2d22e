// src/pages/customers.rs

use axum::{
    extract::{RawQuery, State},
    response::Html,
};

use crate::{
    common::{
        error::AppError,
        query::{FirstValueQuery, QueryError},
    },
    config::AppState,
    handlers::reports::PaginationQuery,
    models::{pagination::PaginatedResult, reports::CustomerValue},
    pages::{
        format::{escape_html, format_count, format_currency, format_date},
        layout::{base_html, error_banner, loading_container, page_header, pagination_controls, report_table, Column},
        view_state::ViewState,
    },
};

const TARGET: &str = "report";

fn columns() -> Vec<Column<CustomerValue>> {
    vec![
        Column { header: "Cliente", render: |c: &CustomerValue| escape_html(&c.customer_name) },
        Column { header: "Email", render: |c: &CustomerValue| escape_html(&c.email) },
        Column { header: "Ordenes", render: |c: &CustomerValue| format_count(c.total_orders) },
        Column { header: "Total Gastado", render: |c: &CustomerValue| format_currency(c.total_spent) },
        Column { header: "Promedio/Orden", render: |c: &CustomerValue| format_currency(c.avg_order_value) },
        Column {
            header: "Ultima Compra",
            render: |c: &CustomerValue| match c.last_order {
                Some(date) => format_date(date),
                None => "Sin compras".to_string(),
            },
        },
    ]
}

// GET /reports/customers
pub async fn customers_page(RawQuery(raw): RawQuery) -> Html<String> {
    let fragment_url = match raw {
        Some(raw) if !raw.is_empty() => format!("/fragments/customers?{}", raw),
        _ => "/fragments/customers".to_string(),
    };

    let content = format!(
        "{}{}",
        page_header("Valor de Clientes", "Clientes ordenados por total gastado"),
        loading_container(TARGET, &fragment_url)
    );
    Html(base_html("Clientes", "/reports/customers", &content))
}

// GET /fragments/customers
pub async fn customers_fragment(
    State(app_state): State<AppState>,
    query: Result<FirstValueQuery<PaginationQuery>, QueryError>,
) -> Html<String> {
    let parsed = query
        .map_err(AppError::from)
        .and_then(|FirstValueQuery(query)| query.parse());
    let result = match parsed {
        Ok(page) => app_state.reports_service.customer_value(page).await,
        Err(e) => Err(e),
    };

    Html(render_customers(ViewState::resolve(
        result,
        "No se pudieron cargar los datos de clientes.",
    )))
}

pub fn render_customers(state: ViewState<PaginatedResult<CustomerValue>>) -> String {
    let (data, error) = state.into_parts();
    let mut html = error.map(error_banner).unwrap_or_default();

    match data {
        Some(result) => {
            html.push_str(&format!(
                r#"<p class="mb-4 text-sm text-[#8D6E63]">Total de clientes: <span class="font-semibold text-[#3E2723]">{}</span></p>"#,
                format_count(result.total)
            ));
            html.push_str(&report_table(&columns(), &result.data, "No hay clientes registrados"));
            html.push_str(&pagination_controls(TARGET, result.page, result.total_pages, |p| {
                (
                    format!("/fragments/customers?page={}", p),
                    format!("/reports/customers?page={}", p),
                )
            }));
        }
        None => html.push_str(&report_table(&columns(), &[], "No hay clientes registrados")),
    }

    html
}
