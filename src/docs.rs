// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Cafeteria Reports", description = "Relatórios somente leitura do POS da cafeteria"),
    paths(
        handlers::reports::get_customers,
        handlers::reports::get_inventory,
        handlers::reports::get_payments,
        handlers::reports::get_products,
        handlers::reports::get_sales_channel,
        handlers::reports::get_sales,
    ),
    components(
        schemas(
            models::reports::SalesDaily,
            models::reports::TopProduct,
            models::reports::StockStatus,
            models::reports::InventoryRisk,
            models::reports::CustomerValue,
            models::reports::SalesChannel,
            models::reports::PaymentMix,
        )
    ),
    tags(
        (name = "Reports", description = "Vendas, produtos, estoque, clientes, canais e pagamentos")
    )
)]
pub struct ApiDoc;
