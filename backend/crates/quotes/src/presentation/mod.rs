//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::QuotesAppState;
pub use router::{quotes_router, quotes_router_generic};
