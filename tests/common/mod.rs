// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use tower::ServiceExt;

use cafeteria_reports::{
    common::error::AppError,
    config::AppState,
    db::ReportStore,
    models::{
        pagination::PageParams,
        reports::{CustomerValue, InventoryLevel, PaymentMix, SalesChannel, SalesDaily, StockThresholds, TopProduct},
    },
    routes::build_router,
};

pub const THRESHOLDS: StockThresholds = StockThresholds { critical_max: 5, low_max: 20 };

/// Store em memória: filtra e pagina como o Postgres faria.
#[derive(Default, Clone)]
pub struct FakeStore {
    pub sales: Vec<SalesDaily>,
    pub products: Vec<TopProduct>,
    pub inventory: Vec<InventoryLevel>,
    pub customers: Vec<CustomerValue>,
    pub channels: Vec<SalesChannel>,
    pub payments: Vec<PaymentMix>,
    /// Toda consulta falha (banco fora do ar).
    pub failing: bool,
}

impl FakeStore {
    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn matching_products(&self, search: Option<&str>) -> Vec<TopProduct> {
        let needle = search.map(str::to_lowercase);
        self.products
            .iter()
            .filter(|p| match &needle {
                Some(n) => p.product_name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect()
    }
}

fn paginate<T: Clone>(rows: &[T], page: PageParams) -> Vec<T> {
    rows.iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ReportStore for FakeStore {
    async fn sales_daily(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SalesDaily>, AppError> {
        self.check()?;
        Ok(self
            .sales
            .iter()
            .filter(|s| s.sale_date >= from && s.sale_date <= to)
            .cloned()
            .collect())
    }

    async fn top_products(&self, search: Option<&str>, page: PageParams) -> Result<Vec<TopProduct>, AppError> {
        self.check()?;
        Ok(paginate(&self.matching_products(search), page))
    }

    async fn count_products(&self, search: Option<&str>) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.matching_products(search).len() as i64)
    }

    async fn inventory_levels(&self, category: Option<&str>) -> Result<Vec<InventoryLevel>, AppError> {
        self.check()?;
        Ok(self
            .inventory
            .iter()
            .filter(|i| category.is_none_or(|c| i.category_name.eq_ignore_ascii_case(c)))
            .cloned()
            .collect())
    }

    async fn customer_value(&self, page: PageParams) -> Result<Vec<CustomerValue>, AppError> {
        self.check()?;
        Ok(paginate(&self.customers, page))
    }

    async fn count_customers(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.customers.len() as i64)
    }

    async fn sales_channels(&self) -> Result<Vec<SalesChannel>, AppError> {
        self.check()?;
        Ok(self.channels.clone())
    }

    async fn payment_mix(&self) -> Result<Vec<PaymentMix>, AppError> {
        self.check()?;
        Ok(self.payments.clone())
    }
}

pub fn app(store: FakeStore) -> Router {
    build_router(AppState::new(Arc::new(store), THRESHOLDS))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// ---- fixtures ----

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn product(id: i64, name: &str) -> TopProduct {
    TopProduct {
        product_id: id,
        product_name: name.to_string(),
        category_name: "Bebidas".to_string(),
        unit_price: Decimal::new(3500, 2),
        total_sold: 100 - id,
        total_revenue: Decimal::new(350000, 2),
        order_count: 40,
    }
}

pub fn sale(day: NaiveDate, orders: i64, revenue_cents: i64) -> SalesDaily {
    SalesDaily {
        sale_date: day,
        total_orders: orders,
        unique_customers: orders,
        total_revenue: Decimal::new(revenue_cents, 2),
        total_items_sold: orders * 2,
        channel: "Presencial".to_string(),
    }
}

pub fn stock(id: i64, category: &str, current_stock: i64) -> InventoryLevel {
    InventoryLevel {
        product_id: id,
        product_name: format!("Producto {}", id),
        category_name: category.to_string(),
        current_stock,
        active: true,
        total_sold_last_30_days: 8,
    }
}

pub fn customer(id: i64, name: &str) -> CustomerValue {
    CustomerValue {
        customer_id: id,
        customer_name: name.to_string(),
        email: format!("cliente{}@campus.mx", id),
        total_orders: 3,
        total_spent: Decimal::new(45000, 2),
        avg_order_value: Decimal::new(15000, 2),
        first_order: None,
        last_order: None,
    }
}

pub fn payment(method: &str, count: i64, amount_cents: i64, percentage: Decimal) -> PaymentMix {
    PaymentMix {
        method: method.to_string(),
        total_payments: count,
        total_amount: Decimal::new(amount_cents, 2),
        percentage,
    }
}
