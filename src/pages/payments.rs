// src/pages/payments.rs

use axum::{extract::State, response::Html};

use crate::{
    config::AppState,
    models::reports::PaymentMix,
    pages::{
        format::{escape_html, format_count, format_currency, format_percentage},
        layout::{base_html, error_banner, loading_container, page_header, report_table, Column},
        view_state::ViewState,
    },
};

fn columns() -> Vec<Column<PaymentMix>> {
    vec![
        Column { header: "Metodo de Pago", render: |p: &PaymentMix| escape_html(&p.method) },
        Column { header: "Cantidad de Pagos", render: |p: &PaymentMix| format_count(p.total_payments) },
        Column { header: "Monto Total", render: |p: &PaymentMix| format_currency(p.total_amount) },
        Column { header: "Porcentaje", render: |p: &PaymentMix| format_percentage(p.percentage) },
    ]
}

// GET /reports/payments
pub async fn payments_page() -> Html<String> {
    let content = format!(
        "{}{}",
        page_header("Metodos de Pago", "Distribucion de pagos por metodo"),
        loading_container("report", "/fragments/payments")
    );
    Html(base_html("Pagos", "/reports/payments", &content))
}

// GET /fragments/payments
pub async fn payments_fragment(State(app_state): State<AppState>) -> Html<String> {
    let result = app_state.reports_service.payment_mix().await;
    Html(render_payments(ViewState::resolve(
        result,
        "No se pudieron cargar los datos de pagos.",
    )))
}

pub fn render_payments(state: ViewState<Vec<PaymentMix>>) -> String {
    let (data, error) = state.into_parts();
    let rows = data.unwrap_or_default();
    let mut html = error.map(error_banner).unwrap_or_default();
    html.push_str(&report_table(&columns(), &rows, "No hay datos de pagos disponibles"));
    html
}
