//! Quotes Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::application::config::QuotesConfig;
use crate::application::exchange_rate::ExchangeRateClient;
use crate::domain::repository::{CustomerRepository, ProductRepository, QuotationRepository};
use crate::infra::postgres::PgQuotesRepository;
use crate::presentation::handlers::{self, QuotesAppState};

/// Create the quotes router with PostgreSQL repository
pub fn quotes_router(repo: PgQuotesRepository, config: QuotesConfig) -> Router {
    quotes_router_generic(repo, config)
}

/// Create a generic quotes router for any repository implementation
pub fn quotes_router_generic<R>(repo: R, config: QuotesConfig) -> Router
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = QuotesAppState {
        repo: Arc::new(repo),
        rates: ExchangeRateClient::new(config.clone()),
        config,
    };

    Router::new()
        .route(
            "/customers",
            get(handlers::list_customers::<R>).post(handlers::create_customer::<R>),
        )
        .route(
            "/customers/{id}",
            get(handlers::get_customer::<R>)
                .put(handlers::update_customer::<R>)
                .delete(handlers::delete_customer::<R>),
        )
        .route(
            "/products",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(
            "/products/{id}",
            get(handlers::get_product::<R>)
                .put(handlers::update_product::<R>)
                .delete(handlers::delete_product::<R>),
        )
        .route(
            "/quotations",
            get(handlers::list_quotations::<R>).post(handlers::create_quotation::<R>),
        )
        .route(
            "/quotations/{id}",
            get(handlers::get_quotation::<R>)
                .put(handlers::update_quotation::<R>)
                .delete(handlers::delete_quotation::<R>),
        )
        .route("/rates/usd", get(handlers::current_usd_rate::<R>))
        .with_state(state)
}
