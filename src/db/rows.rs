// src/db/rows.rs

// Linhas cruas, exatamente como o Postgres devolve. Agregados podem vir NULL
// (SUM sobre nada), então tudo que é agregado é Option aqui.
// A conversão para os models faz as checagens de fronteira.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::{
    common::error::AppError,
    models::reports::{CustomerValue, InventoryLevel, PaymentMix, SalesChannel, SalesDaily, TopProduct},
};

fn money(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

fn count(field: &str, value: Option<i64>) -> Result<i64, AppError> {
    let n = value.unwrap_or(0);
    if n < 0 {
        return Err(AppError::RowMappingError(format!("{} negativo: {}", field, n)));
    }
    Ok(n)
}

fn label(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::RowMappingError(format!("{} vazio", field))),
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct SalesDailyRow {
    pub sale_date: Option<NaiveDate>,
    pub total_orders: Option<i64>,
    pub unique_customers: Option<i64>,
    pub total_revenue: Option<Decimal>,
    pub total_items_sold: Option<i64>,
    pub channel: Option<String>,
}

impl TryFrom<SalesDailyRow> for SalesDaily {
    type Error = AppError;

    fn try_from(row: SalesDailyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            sale_date: row
                .sale_date
                .ok_or_else(|| AppError::RowMappingError("sale_date nulo".into()))?,
            total_orders: count("total_orders", row.total_orders)?,
            unique_customers: count("unique_customers", row.unique_customers)?,
            total_revenue: money(row.total_revenue),
            total_items_sold: count("total_items_sold", row.total_items_sold)?,
            channel: label("channel", row.channel)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TopProductRow {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub category_name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub total_sold: Option<i64>,
    pub total_revenue: Option<Decimal>,
    pub order_count: Option<i64>,
}

impl TryFrom<TopProductRow> for TopProduct {
    type Error = AppError;

    fn try_from(row: TopProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: row.product_id,
            product_name: label("product_name", row.product_name)?,
            category_name: row.category_name.unwrap_or_default(),
            unit_price: money(row.unit_price),
            total_sold: count("total_sold", row.total_sold)?,
            total_revenue: money(row.total_revenue),
            order_count: count("order_count", row.order_count)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct InventoryRow {
    pub product_id: i64,
    pub product_name: Option<String>,
    pub category_name: Option<String>,
    pub current_stock: Option<i64>,
    pub active: Option<bool>,
    pub total_sold_last_30_days: Option<i64>,
}

impl TryFrom<InventoryRow> for InventoryLevel {
    type Error = AppError;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: row.product_id,
            product_name: label("product_name", row.product_name)?,
            category_name: row.category_name.unwrap_or_default(),
            // estoque negativo é dado válido (venda sem baixa); a classificação trata
            current_stock: row.current_stock.unwrap_or(0),
            active: row.active.unwrap_or(false),
            total_sold_last_30_days: count("total_sold_last_30_days", row.total_sold_last_30_days)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct CustomerValueRow {
    pub customer_id: i64,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub total_orders: Option<i64>,
    pub total_spent: Option<Decimal>,
    pub avg_order_value: Option<Decimal>,
    pub first_order: Option<DateTime<Utc>>,
    pub last_order: Option<DateTime<Utc>>,
}

impl TryFrom<CustomerValueRow> for CustomerValue {
    type Error = AppError;

    fn try_from(row: CustomerValueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_id: row.customer_id,
            customer_name: label("customer_name", row.customer_name)?,
            email: row.email.unwrap_or_default(),
            total_orders: count("total_orders", row.total_orders)?,
            total_spent: money(row.total_spent),
            avg_order_value: money(row.avg_order_value),
            first_order: row.first_order,
            last_order: row.last_order,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct SalesChannelRow {
    pub channel: Option<String>,
    pub total_orders: Option<i64>,
    pub unique_customers: Option<i64>,
    pub total_revenue: Option<Decimal>,
    pub avg_order_value: Option<Decimal>,
    pub total_items: Option<i64>,
}

impl TryFrom<SalesChannelRow> for SalesChannel {
    type Error = AppError;

    fn try_from(row: SalesChannelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            channel: label("channel", row.channel)?,
            total_orders: count("total_orders", row.total_orders)?,
            unique_customers: count("unique_customers", row.unique_customers)?,
            total_revenue: money(row.total_revenue),
            avg_order_value: money(row.avg_order_value),
            total_items: count("total_items", row.total_items)?,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PaymentMixRow {
    pub method: Option<String>,
    pub total_payments: Option<i64>,
    pub total_amount: Option<Decimal>,
    pub percentage: Option<Decimal>,
}

impl TryFrom<PaymentMixRow> for PaymentMix {
    type Error = AppError;

    fn try_from(row: PaymentMixRow) -> Result<Self, Self::Error> {
        Ok(Self {
            method: label("method", row.method)?,
            total_payments: count("total_payments", row.total_payments)?,
            total_amount: money(row.total_amount),
            percentage: money(row.percentage),
        })
    }
}

/// Converte todas as linhas, falhando na primeira inválida.
pub(crate) fn map_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<R, Error = AppError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_row() -> SalesChannelRow {
        SalesChannelRow {
            channel: Some("Presencial".into()),
            total_orders: Some(4),
            unique_customers: Some(3),
            total_revenue: None,
            avg_order_value: None,
            total_items: None,
        }
    }

    #[test]
    fn null_aggregates_become_zero() {
        let channel = SalesChannel::try_from(channel_row()).unwrap();
        assert_eq!(channel.total_revenue, Decimal::ZERO);
        assert_eq!(channel.avg_order_value, Decimal::ZERO);
        assert_eq!(channel.total_items, 0);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let mut row = channel_row();
        row.total_orders = Some(-1);
        let err = SalesChannel::try_from(row).unwrap_err();
        assert!(matches!(err, AppError::RowMappingError(m) if m.contains("total_orders")));
    }

    #[test]
    fn blank_labels_are_rejected() {
        let mut row = channel_row();
        row.channel = Some("  ".into());
        assert!(SalesChannel::try_from(row).is_err());
    }

    #[test]
    fn customer_without_orders_keeps_null_dates() {
        let customer = CustomerValue::try_from(CustomerValueRow {
            customer_id: 7,
            customer_name: Some("Ana".into()),
            email: None,
            total_orders: Some(0),
            total_spent: None,
            avg_order_value: None,
            first_order: None,
            last_order: None,
        })
        .unwrap();
        assert_eq!(customer.total_orders, 0);
        assert!(customer.first_order.is_none());
        assert!(customer.last_order.is_none());
        assert_eq!(customer.email, "");
    }

    #[test]
    fn map_rows_stops_at_first_bad_row() {
        let mut bad = channel_row();
        bad.channel = None;
        let result: Result<Vec<SalesChannel>, _> = map_rows(vec![channel_row(), bad]);
        assert!(result.is_err());
    }
}
