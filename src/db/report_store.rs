// src/db/report_store.rs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::{
        pagination::PageParams,
        reports::{CustomerValue, InventoryLevel, PaymentMix, SalesChannel, SalesDaily, TopProduct},
    },
};

/// Fronteira entre o serviço de relatórios e o banco.
/// Cada método corresponde a uma única consulta agregada.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Linhas por (dia, canal) com data do pedido em `[from, to]`.
    async fn sales_daily(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SalesDaily>, AppError>;

    async fn top_products(
        &self,
        search: Option<&str>,
        page: PageParams,
    ) -> Result<Vec<TopProduct>, AppError>;

    async fn count_products(&self, search: Option<&str>) -> Result<i64, AppError>;

    async fn inventory_levels(&self, category: Option<&str>) -> Result<Vec<InventoryLevel>, AppError>;

    async fn customer_value(&self, page: PageParams) -> Result<Vec<CustomerValue>, AppError>;

    async fn count_customers(&self) -> Result<i64, AppError>;

    async fn sales_channels(&self) -> Result<Vec<SalesChannel>, AppError>;

    async fn payment_mix(&self) -> Result<Vec<PaymentMix>, AppError>;
}
