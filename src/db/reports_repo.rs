// src/db/reports_repo.rs

use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::{error::AppError, params::escape_like},
    db::{
        report_store::ReportStore,
        rows::{
            map_rows, CustomerValueRow, InventoryRow, PaymentMixRow, SalesChannelRow, SalesDailyRow,
            TopProductRow,
        },
    },
    models::{
        pagination::PageParams,
        reports::{CustomerValue, InventoryLevel, PaymentMix, SalesChannel, SalesDaily, TopProduct},
    },
};

// Cada consulta usa `&self.pool` como executor: a conexão é adquirida só para
// aquela ida ao banco e devolvida ao terminar (com sucesso ou erro).
#[derive(Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn log_query(report: &'static str, started: Instant, rows: usize) {
    tracing::debug!(
        report,
        elapsed_ms = started.elapsed().as_millis() as u64,
        rows,
        "Query executada"
    );
}

fn like_pattern(search: Option<&str>) -> Option<String> {
    search.map(|term| format!("%{}%", escape_like(term)))
}

#[async_trait]
impl ReportStore for ReportsRepository {
    // 1. Vendas diárias por canal
    async fn sales_daily(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SalesDaily>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, SalesDailyRow>(
            r#"
            SELECT
                o.created_at::date                         AS sale_date,
                COUNT(*)::bigint                           AS total_orders,
                COUNT(DISTINCT o.customer_id)::bigint      AS unique_customers,
                SUM(o.total)::numeric                      AS total_revenue,
                COALESCE(SUM(items.quantity), 0)::bigint   AS total_items_sold,
                o.channel                                  AS channel
            FROM orders o
            LEFT JOIN (
                SELECT order_id, SUM(quantity) AS quantity
                FROM order_items
                GROUP BY order_id
            ) items ON items.order_id = o.id
            WHERE o.created_at::date BETWEEN $1 AND $2
            GROUP BY o.created_at::date, o.channel
            ORDER BY sale_date ASC, channel ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        log_query("sales_daily", started, rows.len());
        map_rows(rows)
    }

    // 2. Ranking de produtos (com busca opcional por nome)
    async fn top_products(
        &self,
        search: Option<&str>,
        page: PageParams,
    ) -> Result<Vec<TopProduct>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, TopProductRow>(
            r#"
            SELECT
                p.id::bigint                                        AS product_id,
                p.name                                              AS product_name,
                c.name                                              AS category_name,
                p.price::numeric                                    AS unit_price,
                COALESCE(SUM(oi.quantity), 0)::bigint               AS total_sold,
                COALESCE(SUM(oi.quantity * oi.unit_price), 0)::numeric AS total_revenue,
                COUNT(DISTINCT oi.order_id)::bigint                 AS order_count
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            LEFT JOIN order_items oi ON oi.product_id = p.id
            WHERE ($1::text IS NULL OR p.name ILIKE $1)
            GROUP BY p.id, p.name, c.name, p.price
            ORDER BY total_sold DESC, p.id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(like_pattern(search))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        log_query("top_products", started, rows.len());
        map_rows(rows)
    }

    async fn count_products(&self, search: Option<&str>) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::bigint FROM products p WHERE ($1::text IS NULL OR p.name ILIKE $1)",
        )
        .bind(like_pattern(search))
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    // 3. Estoque (a classificação é feita no serviço)
    async fn inventory_levels(&self, category: Option<&str>) -> Result<Vec<InventoryLevel>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT
                p.id::bigint        AS product_id,
                p.name              AS product_name,
                c.name              AS category_name,
                p.stock::bigint     AS current_stock,
                p.active            AS active,
                COALESCE(
                    SUM(oi.quantity) FILTER (WHERE o.created_at >= NOW() - INTERVAL '30 days'),
                    0
                )::bigint           AS total_sold_last_30_days
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            LEFT JOIN order_items oi ON oi.product_id = p.id
            LEFT JOIN orders o ON o.id = oi.order_id
            WHERE ($1::text IS NULL OR LOWER(c.name) = LOWER($1))
            GROUP BY p.id, p.name, c.name, p.stock, p.active
            ORDER BY p.stock ASC, p.id ASC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        log_query("inventory_levels", started, rows.len());
        map_rows(rows)
    }

    // 4. Valor do cliente
    async fn customer_value(&self, page: PageParams) -> Result<Vec<CustomerValue>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, CustomerValueRow>(
            r#"
            SELECT
                cu.id::bigint                                   AS customer_id,
                cu.name                                         AS customer_name,
                cu.email                                        AS email,
                COUNT(o.id)::bigint                             AS total_orders,
                COALESCE(SUM(o.total), 0)::numeric              AS total_spent,
                COALESCE(ROUND(AVG(o.total), 2), 0)::numeric    AS avg_order_value,
                MIN(o.created_at)                               AS first_order,
                MAX(o.created_at)                               AS last_order
            FROM customers cu
            LEFT JOIN orders o ON o.customer_id = cu.id
            GROUP BY cu.id, cu.name, cu.email
            ORDER BY total_spent DESC, cu.id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        log_query("customer_value", started, rows.len());
        map_rows(rows)
    }

    async fn count_customers(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    // 5. Vendas por canal
    async fn sales_channels(&self) -> Result<Vec<SalesChannel>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, SalesChannelRow>(
            r#"
            SELECT
                o.channel                                       AS channel,
                COUNT(*)::bigint                                AS total_orders,
                COUNT(DISTINCT o.customer_id)::bigint           AS unique_customers,
                COALESCE(SUM(o.total), 0)::numeric              AS total_revenue,
                COALESCE(ROUND(AVG(o.total), 2), 0)::numeric    AS avg_order_value,
                COALESCE(SUM(items.quantity), 0)::bigint        AS total_items
            FROM orders o
            LEFT JOIN (
                SELECT order_id, SUM(quantity) AS quantity
                FROM order_items
                GROUP BY order_id
            ) items ON items.order_id = o.id
            GROUP BY o.channel
            ORDER BY total_revenue DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        log_query("sales_channels", started, rows.len());
        map_rows(rows)
    }

    // 6. Mix de pagamentos. O total geral sai da mesma passada (janela sobre o agregado).
    async fn payment_mix(&self) -> Result<Vec<PaymentMix>, AppError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, PaymentMixRow>(
            r#"
            SELECT
                pm.method                                       AS method,
                COUNT(*)::bigint                                AS total_payments,
                COALESCE(SUM(pm.amount), 0)::numeric            AS total_amount,
                COALESCE(
                    100 * SUM(pm.amount) / NULLIF(SUM(SUM(pm.amount)) OVER (), 0),
                    0
                )::numeric                                      AS percentage
            FROM payments pm
            GROUP BY pm.method
            ORDER BY total_amount DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        log_query("payment_mix", started, rows.len());
        map_rows(rows)
    }
}
