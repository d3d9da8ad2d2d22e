// tests/store.rs
//
// Consultas reais contra um Postgres descartável criado pelo `sqlx::test`.
// Rodar com: DATABASE_URL=postgres://... cargo test --test store -- --ignored

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use cafeteria_reports::{
    db::{ReportStore, ReportsRepository},
    models::{pagination::PageParams, reports::StockThresholds},
    services::ReportsService,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn all() -> PageParams {
    PageParams { page: 1, limit: 100 }
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn sales_range_includes_both_ends(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    let rows = repo.sales_daily(date(2024, 1, 1), date(2024, 1, 31)).await.unwrap();

    let dates: Vec<_> = rows.iter().map(|r| r.sale_date).collect();
    assert_eq!(dates, [date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 31)]);
    assert_eq!(rows[0].total_revenue, Decimal::new(20000, 2));
    assert_eq!(rows[0].total_items_sold, 4);
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn single_day_range(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    let rows = repo.sales_daily(date(2024, 1, 15), date(2024, 1, 15)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].channel, "En linea");
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn search_wildcards_match_literally(pool: PgPool) {
    let repo = ReportsRepository::new(pool);

    let percent = repo.top_products(Some("50%"), all()).await.unwrap();
    let names: Vec<_> = percent.iter().map(|p| p.product_name.as_str()).collect();
    assert_eq!(names, ["Descuento 50%"]);
    assert_eq!(repo.count_products(Some("50%")).await.unwrap(), 1);

    assert!(repo.top_products(Some("_"), all()).await.unwrap().is_empty());
    assert_eq!(repo.count_products(Some("_")).await.unwrap(), 0);
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn search_is_case_insensitive_and_paged(pool: PgPool) {
    let service = ReportsService::new(
        std::sync::Arc::new(ReportsRepository::new(pool)),
        StockThresholds { critical_max: 5, low_max: 20 },
    );

    let result = service
        .top_products(PageParams { page: 2, limit: 1 }, Some("DESCUENTO"))
        .await
        .unwrap();
    assert_eq!(result.total, 2);
    assert_eq!(result.total_pages, 2);
    assert_eq!(result.data.len(), 1);
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn payment_percentages_add_up_to_100(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    let rows = repo.payment_mix().await.unwrap();

    let methods: Vec<_> = rows.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, ["Vale", "Tarjeta", "Efectivo"]);
    assert_eq!(rows[0].percentage, Decimal::from(40));

    let total: Decimal = rows.iter().map(|r| r.percentage).sum();
    assert!((total - Decimal::from(100)).abs() < Decimal::new(1, 6), "soma = {}", total);
}

#[sqlx::test(migrations = false, fixtures("schema"))]
#[ignore = "precisa de DATABASE_URL"]
async fn empty_store_has_no_payments(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    assert!(repo.payment_mix().await.unwrap().is_empty());
    assert!(repo.sales_channels().await.unwrap().is_empty());
    assert_eq!(repo.count_customers().await.unwrap(), 0);
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn channels_by_revenue(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    let rows = repo.sales_channels().await.unwrap();

    let channels: Vec<_> = rows.iter().map(|r| (r.channel.as_str(), r.total_revenue)).collect();
    assert_eq!(
        channels,
        [("En linea", Decimal::new(55000, 2)), ("Presencial", Decimal::new(45000, 2))]
    );
    assert_eq!(rows[0].unique_customers, 2);
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn inventory_filter_and_order(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    let rows = repo.inventory_levels(Some("PANADERIA")).await.unwrap();

    let ids: Vec<_> = rows.iter().map(|r| (r.product_id, r.current_stock, r.active)).collect();
    assert_eq!(ids, [(3, 3, true), (4, 12, false)]);
}

#[sqlx::test(migrations = false, fixtures("schema", "seed"))]
#[ignore = "precisa de DATABASE_URL"]
async fn customers_by_total_spent(pool: PgPool) {
    let repo = ReportsRepository::new(pool);
    let rows = repo.customer_value(all()).await.unwrap();

    let names: Vec<_> = rows.iter().map(|r| r.customer_name.as_str()).collect();
    assert_eq!(names, ["Ana Ruiz", "Luis Mora", "Eva Campos"]);
    assert_eq!(rows[0].total_spent, Decimal::new(55000, 2));
    assert_eq!(rows[2].total_orders, 0);
    assert!(rows[2].last_order.is_none());
    assert_eq!(repo.count_customers().await.unwrap(), 3);
}
