// src/services/reports_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::ReportStore,
    models::{
        pagination::{PageParams, PaginatedResult},
        reports::{
            CustomerValue, InventoryRisk, PaymentMix, SalesChannel, SalesDaily, StockThresholds,
            TopProduct,
        },
    },
};

#[derive(Clone)]
pub struct ReportsService {
    store: Arc<dyn ReportStore>,
    thresholds: StockThresholds,
}

impl ReportsService {
    pub fn new(store: Arc<dyn ReportStore>, thresholds: StockThresholds) -> Self {
        Self { store, thresholds }
    }

    pub async fn sales_daily(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SalesDaily>, AppError> {
        // Intervalo invertido não é erro: simplesmente não há linhas
        if from > to {
            return Ok(Vec::new());
        }
        self.store.sales_daily(from, to).await
    }

    pub async fn top_products(
        &self,
        page: PageParams,
        search: Option<&str>,
    ) -> Result<PaginatedResult<TopProduct>, AppError> {
        let data = self.store.top_products(search, page).await?;
        let total = self.store.count_products(search).await?;
        Ok(PaginatedResult::new(data, total, page))
    }

    pub async fn inventory_risk(&self, category: Option<&str>) -> Result<Vec<InventoryRisk>, AppError> {
        let levels = self.store.inventory_levels(category).await?;
        Ok(levels
            .into_iter()
            .map(|level| InventoryRisk::classify(level, &self.thresholds))
            .collect())
    }

    pub async fn customer_value(&self, page: PageParams) -> Result<PaginatedResult<CustomerValue>, AppError> {
        let data = self.store.customer_value(page).await?;
        let total = self.store.count_customers().await?;
        Ok(PaginatedResult::new(data, total, page))
    }

    pub async fn sales_channels(&self) -> Result<Vec<SalesChannel>, AppError> {
        self.store.sales_channels().await
    }

    pub async fn payment_mix(&self) -> Result<Vec<PaymentMix>, AppError> {
        self.store.payment_mix().await
    }
}
