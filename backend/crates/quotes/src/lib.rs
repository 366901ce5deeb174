//! Quotes Backend Module
//!
//! Customers, products, and price quotations for the back office.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, line items, the totals calculator, repository traits
//! - `application/` - Use cases, exchange-rate client, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Customer and product catalogs
//! - Quotations with per-line discount/tax, TL/USD currency split,
//!   document-level discount and tax toggle
//! - Server-side total computation (totals are always derived from items)
//! - USD→TL rate fetch with a constant fallback

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::QuotesConfig;
pub use error::{QuotesError, QuotesResult};
pub use infra::postgres::PgQuotesRepository;
pub use presentation::router::quotes_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgQuotesRepository as QuotesStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
