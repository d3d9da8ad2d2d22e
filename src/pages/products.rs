// src/pages/products.rs

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
    handlers::reports::ProductsQuery,
    models::{pagination::PaginatedResult, reports::TopProduct},
    pages::{
        format::{escape_html, format_count, format_currency},
        layout::{base_html, error_banner, loading_container, page_header, pagination_controls, report_table, Column},
        view_state::ViewState,
    },
};

const TARGET: &str = "report";

fn columns() -> Vec<Column<TopProduct>> {
    vec![
        Column { header: "Producto", render: |p: &TopProduct| escape_html(&p.product_name) },
        Column { header: "Categoria", render: |p: &TopProduct| escape_html(&p.category_name) },
        Column { header: "Precio", render: |p: &TopProduct| format_currency(p.unit_price) },
        Column { header: "Vendidos", render: |p: &TopProduct| format_count(p.total_sold) },
        Column { header: "Ingresos", render: |p: &TopProduct| format_currency(p.total_revenue) },
        Column { header: "Ordenes", render: |p: &TopProduct| format_count(p.order_count) },
    ]
}

fn query_string(page: i64, search: Option<&str>) -> String {
    match search {
        Some(q) => format!("page={}&q={}", page, urlencoding::encode(q)),
        None => format!("page={}", page),
    }
}

// GET /reports/products
pub async fn products_page(
    query: Result<FirstValueQuery<ProductsQuery>, QueryError>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let query = query.map(|FirstValueQuery(q)| q).unwrap_or_default();
    let search = query.q.as_deref().map(str::trim).unwrap_or_default();
    let fragment_url = match raw {
        Some(raw) if !raw.is_empty() => format!("/fragments/products?{}", raw),
        _ => "/fragments/products".to_string(),
    };

    let form = format!(
        r##"<div class="bg-white border border-[#E5DCC5] p-6 mb-6"><form action="/reports/products" method="get" hx-get="/fragments/products" hx-target="#{t}" hx-sync="#{t}:replace" class="flex gap-4"><input type="text" name="q" value="{q}" placeholder="Buscar producto..." class="flex-1 px-4 py-2 border border-[#E5DCC5] bg-white text-[#3E2723]"><button type="submit" class="px-6 py-2 bg-[#2C1810] text-white hover:bg-[#4E342E]">Buscar</button></form></div>"##,
        t = TARGET,
        q = escape_html(search)
    );

    let content = format!(
        "{}{}{}",
        page_header("Top Productos", "Productos mas vendidos"),
        form,
        loading_container(TARGET, &fragment_url)
    );
    Html(base_html("Top Productos", "/reports/products", &content))
}

// GET /fragments/products
pub async fn products_fragment(
    State(app_state): State<AppState>,
    query: Result<FirstValueQuery<ProductsQuery>, QueryError>,
) -> Html<String> {
    let parsed = query
        .map_err(AppError::from)
        .and_then(|FirstValueQuery(query)| query.parse());
    let result = match parsed {
        Ok((page, search)) => app_state
            .reports_service
            .top_products(page, search.as_deref())
            .await
            .map(|result| (result, search)),
        Err(e) => Err(e),
    };

    Html(render_products(ViewState::resolve(result, "No se pudieron cargar los datos.")))
}

pub fn render_products(state: ViewState<(PaginatedResult<TopProduct>, Option<String>)>) -> String {
    let (data, error) = state.into_parts();
    let mut html = error.map(error_banner).unwrap_or_default();

    match data {
        Some((result, search)) => {
            html.push_str(&report_table(&columns(), &result.data, "No hay productos disponibles"));
            html.push_str(&pagination_controls(TARGET, result.page, result.total_pages, |p| {
                let qs = query_string(p, search.as_deref());
                (format!("/fragments/products?{}", qs), format!("/reports/products?{}", qs))
            }));
        }
        None => html.push_str(&report_table(&columns(), &[], "No hay productos disponibles")),
    }

    html
}
