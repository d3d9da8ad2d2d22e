pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod reports_service;
pub use reports_service::ReportsService;
