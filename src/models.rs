pub mod pagination;
pub mod reports;
