// src/services/dashboard_service.rs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        pagination::PageParams,
        reports::{InventoryRisk, SalesDaily},
    },
    services::ReportsService,
};

/// Totais dos cards "Ventas Totales" e "Ordenes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesTotals {
    pub revenue: Decimal,
    pub orders: i64,
}

impl SalesTotals {
    pub fn from_rows(rows: &[SalesDaily]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            revenue: acc.revenue + row.total_revenue,
            orders: acc.orders + row.total_orders,
        })
    }
}

/// Janela do dashboard: de hoje - 30 dias até hoje, inclusive.
pub fn last_30_days(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from = today.checked_sub_days(Days::new(30)).unwrap_or(NaiveDate::MIN);
    (from, today)
}

pub fn count_at_risk(rows: &[InventoryRisk]) -> usize {
    rows.iter().filter(|r| r.stock_status.is_at_risk()).count()
}

// Cada KPI é uma consulta independente: a falha de um não derruba os outros.
#[derive(Clone)]
pub struct DashboardService {
    reports: ReportsService,
}

impl DashboardService {
    pub fn new(reports: ReportsService) -> Self {
        Self { reports }
    }

    pub async fn sales_totals(&self, today: NaiveDate) -> Result<SalesTotals, AppError> {
        let (from, to) = last_30_days(today);
        let rows = self.reports.sales_daily(from, to).await?;
        Ok(SalesTotals::from_rows(&rows))
    }

    /// Nome do produto mais vendido, se houver algum.
    pub async fn top_product_name(&self) -> Result<Option<String>, AppError> {
        let page = PageParams { page: 1, limit: 1 };
        let result = self.reports.top_products(page, None).await?;
        Ok(result.data.into_iter().next().map(|p| p.product_name))
    }

    pub async fn low_stock_count(&self) -> Result<usize, AppError> {
        let rows = self.reports.inventory_risk(None).await?;
        Ok(count_at_risk(&rows))
    }

    pub async fn total_customers(&self) -> Result<i64, AppError> {
        let page = PageParams { page: 1, limit: 1 };
        Ok(self.reports.customer_value(page).await?.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::StockStatus;

    fn day(revenue: i64, orders: i64) -> SalesDaily {
        SalesDaily {
            sale_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total_orders: orders,
            unique_customers: 1,
            total_revenue: Decimal::new(revenue, 2),
            total_items_sold: 0,
            channel: "Presencial".into(),
        }
    }

    fn stock(status: StockStatus) -> InventoryRisk {
        InventoryRisk {
            product_id: 1,
            product_name: "Cafe".into(),
            category_name: "Bebidas".into(),
            current_stock: 0,
            active: true,
            stock_status: status,
            total_sold_last_30_days: 0,
        }
    }

    #[test]
    fn totals_sum_across_days_and_channels() {
        let totals = SalesTotals::from_rows(&[day(1050, 2), day(0, 0), day(250, 1)]);
        assert_eq!(totals.revenue, Decimal::new(1300, 2));
        assert_eq!(totals.orders, 3);
    }

    #[test]
    fn no_rows_is_zero() {
        assert_eq!(SalesTotals::from_rows(&[]), SalesTotals::default());
    }

    #[test]
    fn window_is_thirty_days_back() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (from, to) = last_30_days(today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(to, today);
    }

    #[test]
    fn only_critical_and_empty_count_as_risk() {
        let rows = [
            stock(StockStatus::SinStock),
            stock(StockStatus::Critico),
            stock(StockStatus::Bajo),
            stock(StockStatus::Normal),
        ];
        assert_eq!(count_at_risk(&rows), 2);
    }
}
