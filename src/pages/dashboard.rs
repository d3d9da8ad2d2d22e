// src/pages/dashboard.rs

use axum::{extract::State, response::Html};
use chrono::Utc;

use crate::{
    config::AppState,
    models::reports::SalesChannel,
    pages::{
        format::{escape_html, format_count, format_currency},
        layout::{base_html, kpi_card, page_header},
        view_state::ViewState,
    },
    services::dashboard_service::SalesTotals,
};

const LOAD_ERROR: &str = "Error de carga";

// Cada widget tem o próprio fragmento: o htmx dispara todos em paralelo e
// cada um resolve sozinho, então a falha de um não invalida os outros.
fn widget(url: &str, class: &str, placeholder: &str) -> String {
    format!(
        r#"<div class="{}" hx-get="{}" hx-trigger="load" hx-swap="innerHTML">{}</div>"#,
        class, url, placeholder
    )
}

// GET /
pub async fn dashboard_page() -> Html<String> {
    let loading_card = |title: &str, label: &str| kpi_card(title, "...", Some(label));

    let cards = format!(
        r#"<div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-5 gap-6 mb-8">{}{}{}{}</div>"#,
        widget(
            "/fragments/dashboard/sales",
            "contents",
            &format!(
                "{}{}",
                loading_card("Ventas Totales", "Ultimos 30 dias"),
                loading_card("Ordenes", "Pedidos completados")
            )
        ),
        widget("/fragments/dashboard/top-product", "", &loading_card("Producto Top", "Mas vendido")),
        widget("/fragments/dashboard/stock", "", &loading_card("Stock Bajo", "Productos en riesgo")),
        widget("/fragments/dashboard/customers", "", &loading_card("Clientes", "Total registrados")),
    );

    let channels = format!(
        r#"<div class="bg-white border border-[#E5DCC5] p-6"><h2 class="text-lg font-semibold text-[#3E2723] mb-4">Ventas por Canal</h2>{}</div>"#,
        widget(
            "/fragments/dashboard/channels",
            "grid grid-cols-1 md:grid-cols-3 gap-4",
            r#"<p class="text-[#8D6E63] col-span-3">Cargando datos...</p>"#
        )
    );

    let content = format!(
        "{}{}{}",
        page_header("Dashboard", "Resumen de los ultimos 30 dias"),
        cards,
        channels
    );
    Html(base_html("Dashboard", "/", &content))
}

// GET /fragments/dashboard/sales
pub async fn sales_widget(State(app_state): State<AppState>) -> Html<String> {
    let today = Utc::now().date_naive();
    let state = ViewState::resolve(app_state.dashboard_service.sales_totals(today).await, LOAD_ERROR);
    Html(render_sales_cards(state))
}

pub fn render_sales_cards(state: ViewState<SalesTotals>) -> String {
    let (revenue, orders) = match state {
        ViewState::Ready(totals) => (format_currency(totals.revenue), format_count(totals.orders)),
        ViewState::Failed(message) => (message.to_string(), message.to_string()),
    };
    format!(
        "{}{}",
        kpi_card("Ventas Totales", &revenue, Some("Ultimos 30 dias")),
        kpi_card("Ordenes", &orders, Some("Pedidos completados"))
    )
}

// GET /fragments/dashboard/top-product
pub async fn top_product_widget(State(app_state): State<AppState>) -> Html<String> {
    let value = match ViewState::resolve(app_state.dashboard_service.top_product_name().await, LOAD_ERROR) {
        ViewState::Ready(Some(name)) => name,
        ViewState::Ready(None) => "Sin datos".to_string(),
        ViewState::Failed(message) => message.to_string(),
    };
    Html(kpi_card("Producto Top", &value, Some("Mas vendido")))
}

// GET /fragments/dashboard/stock
pub async fn stock_widget(State(app_state): State<AppState>) -> Html<String> {
    let value = match ViewState::resolve(app_state.dashboard_service.low_stock_count().await, LOAD_ERROR) {
        ViewState::Ready(count) => count.to_string(),
        ViewState::Failed(message) => message.to_string(),
    };
    Html(kpi_card("Stock Bajo", &value, Some("Productos en riesgo")))
}

// GET /fragments/dashboard/customers
pub async fn customers_widget(State(app_state): State<AppState>) -> Html<String> {
    let value = match ViewState::resolve(app_state.dashboard_service.total_customers().await, LOAD_ERROR) {
        ViewState::Ready(total) => format_count(total),
        ViewState::Failed(message) => message.to_string(),
    };
    Html(kpi_card("Clientes", &value, Some("Total registrados")))
}

// GET /fragments/dashboard/channels
pub async fn channels_widget(State(app_state): State<AppState>) -> Html<String> {
    let state = ViewState::resolve(app_state.reports_service.sales_channels().await, LOAD_ERROR);
    Html(render_channels(state))
}

pub fn render_channels(state: ViewState<Vec<SalesChannel>>) -> String {
    let channels = state.into_parts().0.unwrap_or_default();
    if channels.is_empty() {
        return r#"<p class="text-[#8D6E63] col-span-3">Sin datos disponibles. Verifica la conexion a la BD.</p>"#
            .to_string();
    }

    channels
        .iter()
        .map(|channel| {
            format!(
                r#"<div class="p-4 bg-[#FAF7F2] border border-[#E5DCC5]"><p class="text-sm text-[#8D6E63]">{}</p><p class="text-xl font-bold text-[#3E2723]">{}</p><p class="text-xs text-[#8D6E63]">{} ordenes</p></div>"#,
                escape_html(&channel.channel),
                format_currency(channel.total_revenue),
                format_count(channel.total_orders)
            )
        })
        .collect()
}
