// src/routes.rs

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs, handlers, pages};

/// Monta o router completo: API JSON, documentação, páginas e fragmentos htmx.
pub fn build_router(app_state: AppState) -> Router {
    let report_routes = Router::new()
        .route("/customers", get(handlers::reports::get_customers))
        .route("/inventory", get(handlers::reports::get_inventory))
        .route("/payments", get(handlers::reports::get_payments))
        .route("/products", get(handlers::reports::get_products))
        .route("/sales-channel", get(handlers::reports::get_sales_channel))
        .route("/sales", get(handlers::reports::get_sales));

    let page_routes = Router::new()
        .route("/", get(pages::dashboard::dashboard_page))
        .route("/reports/products", get(pages::products::products_page))
        .route("/reports/customers", get(pages::customers::customers_page))
        .route("/reports/inventory", get(pages::inventory::inventory_page))
        .route("/reports/payments", get(pages::payments::payments_page));

    let fragment_routes = Router::new()
        .route("/dashboard/sales", get(pages::dashboard::sales_widget))
        .route("/dashboard/top-product", get(pages::dashboard::top_product_widget))
        .route("/dashboard/stock", get(pages::dashboard::stock_widget))
        .route("/dashboard/customers", get(pages::dashboard::customers_widget))
        .route("/dashboard/channels", get(pages::dashboard::channels_widget))
        .route("/products", get(pages::products::products_fragment))
        .route("/customers", get(pages::customers::customers_fragment))
        .route("/inventory", get(pages::inventory::inventory_fragment))
        .route("/payments", get(pages::payments::payments_fragment));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/api/swagger-ui").url("/api/docs/openapi.json", docs::ApiDoc::openapi()))
        .nest("/api/reports", report_routes)
        .nest("/fragments", fragment_routes)
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
