// src/models/reports.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Projeções somente-leitura. Os nomes dos campos seguem o contrato JSON
// consumido pelo frontend (snake_case).

// 1. Vendas por dia e canal
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesDaily {
    pub sale_date: NaiveDate,
    pub total_orders: i64,
    pub unique_customers: i64,
    pub total_revenue: Decimal,
    pub total_items_sold: i64,
    pub channel: String,
}

// 2. Ranking de produtos (por unidades vendidas)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopProduct {
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub unit_price: Decimal,
    pub total_sold: i64,
    pub total_revenue: Decimal,
    pub order_count: i64,
}

// 3. Risco de estoque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "Sin Stock")]
    SinStock,
    Critico,
    Bajo,
    Normal,
}

impl StockStatus {
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::SinStock => "Sin Stock",
            StockStatus::Critico => "Critico",
            StockStatus::Bajo => "Bajo",
            StockStatus::Normal => "Normal",
        }
    }

    /// Sem estoque ou crítico: o que o dashboard conta como "em risco".
    pub fn is_at_risk(self) -> bool {
        matches!(self, StockStatus::SinStock | StockStatus::Critico)
    }
}

/// Limites que particionam o estoque atual. Vêm da configuração;
/// não existe valor padrão no código.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockThresholds {
    /// Maior estoque ainda considerado "Critico".
    pub critical_max: i64,
    /// Maior estoque ainda considerado "Bajo".
    pub low_max: i64,
}

impl StockThresholds {
    pub fn classify(&self, current_stock: i64) -> StockStatus {
        if current_stock <= 0 {
            StockStatus::SinStock
        } else if current_stock <= self.critical_max {
            StockStatus::Critico
        } else if current_stock <= self.low_max {
            StockStatus::Bajo
        } else {
            StockStatus::Normal
        }
    }
}

// Linha de estoque como vem do banco, antes da classificação
#[derive(Debug, Clone)]
pub struct InventoryLevel {
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub current_stock: i64,
    pub active: bool,
    pub total_sold_last_30_days: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryRisk {
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub current_stock: i64,
    pub active: bool,
    pub stock_status: StockStatus,
    pub total_sold_last_30_days: i64,
}

impl InventoryRisk {
    pub fn classify(level: InventoryLevel, thresholds: &StockThresholds) -> Self {
        Self {
            stock_status: thresholds.classify(level.current_stock),
            product_id: level.product_id,
            product_name: level.product_name,
            category_name: level.category_name,
            current_stock: level.current_stock,
            active: level.active,
            total_sold_last_30_days: level.total_sold_last_30_days,
        }
    }
}

// 4. Valor do cliente
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerValue {
    pub customer_id: i64,
    pub customer_name: String,
    pub email: String,
    pub total_orders: i64,
    pub total_spent: Decimal,
    pub avg_order_value: Decimal,
    pub first_order: Option<DateTime<Utc>>,
    pub last_order: Option<DateTime<Utc>>,
}

// 5. Vendas por canal
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesChannel {
    pub channel: String,
    pub total_orders: i64,
    pub unique_customers: i64,
    pub total_revenue: Decimal,
    pub avg_order_value: Decimal,
    pub total_items: i64,
}

// 6. Mix de pagamentos
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentMix {
    pub method: String,
    pub total_payments: i64,
    pub total_amount: Decimal,
    pub percentage: Decimal,
}
