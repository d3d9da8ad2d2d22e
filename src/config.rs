// src/config.rs

use std::{env, sync::Arc, time::Duration};
use thiserror::Error;

use crate::{
    db::ReportStore,
    models::reports::StockThresholds,
    services::{DashboardService, ReportsService},
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} deve ser definida")]
    Missing(&'static str),

    #[error("{name} inválida: '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("STOCK_CRITICAL_MAX ({critical}) não pode ser maior que STOCK_LOW_MAX ({low})")]
    ThresholdOrder { critical: i64, low: i64 },
}

/// Tudo que o processo lê do ambiente na inicialização.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_idle_timeout: Duration,
    pub db_acquire_timeout: Duration,
    pub stock_thresholds: StockThresholds,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `env::var` para os testes não mexerem no ambiente do processo
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20u32)?;
        let db_idle_timeout = Duration::from_secs(parse_or(&lookup, "DB_IDLE_TIMEOUT_SECS", 30u64)?);
        let db_acquire_timeout =
            Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 2u64)?);

        let critical: i64 = parse_required(&lookup, "STOCK_CRITICAL_MAX")?;
        let low: i64 = parse_required(&lookup, "STOCK_LOW_MAX")?;
        if critical < 0 {
            return Err(ConfigError::Invalid {
                name: "STOCK_CRITICAL_MAX",
                value: critical.to_string(),
            });
        }
        if critical > low {
            return Err(ConfigError::ThresholdOrder { critical, low });
        }

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            db_idle_timeout,
            db_acquire_timeout,
            stock_thresholds: StockThresholds {
                critical_max: critical,
                low_max: low,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_required<F, T>(lookup: &F, name: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let value = lookup(name).ok_or(ConfigError::Missing(name))?;
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub reports_service: ReportsService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Monta o gráfico de dependências a partir de um store já construído
    pub fn new(store: Arc<dyn ReportStore>, thresholds: StockThresholds) -> Self {
        let reports_service = ReportsService::new(store, thresholds);
        let dashboard_service = DashboardService::new(reports_service.clone());

        Self {
            reports_service,
            dashboard_service,
        }
    }
}
