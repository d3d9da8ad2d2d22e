// Camada de apresentação: páginas HTML renderizadas no servidor + fragmentos htmx.
pub mod customers;
pub mod dashboard;
pub mod format;
pub mod inventory;
pub mod layout;
pub mod payments;
pub mod products;
pub mod view_state;
