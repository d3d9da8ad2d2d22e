// src/pages/inventory.rs

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
    handlers::reports::InventoryQuery,
    models::reports::InventoryRisk,
    pages::{
        format::{escape_html, format_count},
        layout::{base_html, error_banner, loading_container, page_header, report_table, Column},
        view_state::ViewState,
    },
    services::dashboard_service::count_at_risk,
};

const TARGET: &str = "report";

fn status_cell(row: &InventoryRisk) -> String {
    let class = if row.stock_status.is_at_risk() {
        "text-red-600 font-semibold"
    } else {
        "text-[#3E2723]"
    };
    format!(r#"<span class="{}">{}</span>"#, class, row.stock_status.label())
}

fn columns() -> Vec<Column<InventoryRisk>> {
    vec![
        Column { header: "Producto", render: |r: &InventoryRisk| escape_html(&r.product_name) },
        Column { header: "Categoria", render: |r: &InventoryRisk| escape_html(&r.category_name) },
        Column { header: "Stock Actual", render: |r: &InventoryRisk| format_count(r.current_stock) },
        Column { header: "Estado", render: status_cell },
        Column {
            header: "Vendidos (30 dias)",
            render: |r: &InventoryRisk| format_count(r.total_sold_last_30_days),
        },
        Column {
            header: "Activo",
            render: |r: &InventoryRisk| if r.active { "Si".to_string() } else { "No".to_string() },
        },
    ]
}

// GET /reports/inventory
pub async fn inventory_page(
    query: Result<FirstValueQuery<InventoryQuery>, QueryError>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let category = query
        .map(|FirstValueQuery(q)| q)
        .unwrap_or_default()
        .parse()
        .unwrap_or_default();
    let fragment_url = match raw {
        Some(raw) if !raw.is_empty() => format!("/fragments/inventory?{}", raw),
        _ => "/fragments/inventory".to_string(),
    };

    let filter = format!(
        r##"<form action="/reports/inventory" method="get" hx-get="/fragments/inventory" hx-target="#{t}" hx-sync="#{t}:replace" class="mb-6 flex gap-4"><input type="text" name="category" value="{c}" placeholder="Filtrar por categoria..." class="flex-1 px-4 py-2 border border-[#E5DCC5] bg-white text-[#3E2723]"><button type="submit" class="px-6 py-2 bg-[#2C1810] text-white hover:bg-[#4E342E]">Filtrar</button></form>"##,
        t = TARGET,
        c = escape_html(&category)
    );

    let content = format!(
        "{}{}{}",
        page_header("Riesgo de Inventario", "Productos con stock bajo o agotado"),
        filter,
        loading_container(TARGET, &fragment_url)
    );
    Html(base_html("Inventario", "/reports/inventory", &content))
}

// GET /fragments/inventory
pub async fn inventory_fragment(
    State(app_state): State<AppState>,
    query: Result<FirstValueQuery<InventoryQuery>, QueryError>,
) -> Html<String> {
    let result = match query {
        Ok(FirstValueQuery(query)) => {
            let category = query.parse();
            app_state
                .reports_service
                .inventory_risk(category.as_deref())
                .await
        }
        Err(e) => Err(AppError::from(e)),
    };

    Html(render_inventory(ViewState::resolve(
        result,
        "No se pudieron cargar los datos de inventario.",
    )))
}

pub fn render_inventory(state: ViewState<Vec<InventoryRisk>>) -> String {
    let (data, error) = state.into_parts();
    let rows = data.unwrap_or_default();
    let mut html = error.map(error_banner).unwrap_or_default();

    let at_risk = count_at_risk(&rows);
    let risk_class = if at_risk > 0 { "text-red-600" } else { "text-[#3E2723]" };
    html.push_str(&format!(
        r#"<div class="bg-white border border-[#E5DCC5] p-6 mb-6"><div class="flex items-center gap-4"><div><p class="text-sm text-[#8D6E63]">Productos en Riesgo</p><p class="text-3xl font-bold {}">{}</p></div><div class="border-l border-[#E5DCC5] pl-4"><p class="text-sm text-[#8D6E63]">Total Productos</p><p class="text-3xl font-bold text-[#3E2723]">{}</p></div></div></div>"#,
        risk_class,
        at_risk,
        rows.len()
    ));
    html.push_str(&report_table(&columns(), &rows, "No hay datos de inventario disponibles"));
    html
}
