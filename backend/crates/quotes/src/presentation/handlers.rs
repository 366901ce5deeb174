//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use kernel::id::{CustomerId, ProductId, QuotationId};

use crate::application::config::QuotesConfig;
use crate::application::exchange_rate::ExchangeRateClient;
use crate::application::save_quotation::{SaveQuotationInput, SaveQuotationUseCase};
use crate::domain::entities::{Customer, Product};
use crate::domain::repository::{CustomerRepository, ProductRepository, QuotationRepository};
use crate::domain::value_objects::clamp_percent;
use crate::error::{QuotesError, QuotesResult};
use crate::presentation::dto::{
    CustomerRequest, CustomerResponse, ExchangeRateResponse, ProductRequest, ProductResponse,
    QuotationRequest, QuotationResponse,
};

/// Shared state for quotes handlers
#[derive(Clone)]
pub struct QuotesAppState<R>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<QuotesConfig>,
    pub rates: ExchangeRateClient,
}

// ============================================================================
// Customers
// ============================================================================

/// POST /api/customers
pub async fn create_customer<R>(
    State(state): State<QuotesAppState<R>>,
    Json(req): Json<CustomerRequest>,
) -> QuotesResult<(StatusCode, Json<CustomerResponse>)>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(QuotesError::Validation("Customer name is required".into()));
    }

    let mut customer = Customer::new(name);
    customer.email = req.email;
    customer.phone = req.phone;
    customer.address = req.address;
    customer.tax_office = req.tax_office;
    customer.tax_number = req.tax_number;

    CustomerRepository::create(state.repo.as_ref(), &customer).await?;

    tracing::info!(customer_id = %customer.customer_id, "Customer created");

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(&customer))))
}

/// GET /api/customers
pub async fn list_customers<R>(
    State(state): State<QuotesAppState<R>>,
) -> QuotesResult<Json<Vec<CustomerResponse>>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let customers = CustomerRepository::list(state.repo.as_ref()).await?;
    Ok(Json(customers.iter().map(CustomerResponse::from).collect()))
}

/// GET /api/customers/{id}
pub async fn get_customer<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
) -> QuotesResult<Json<CustomerResponse>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let customer = CustomerRepository::find_by_id(state.repo.as_ref(), &CustomerId::from_uuid(id))
        .await?
        .ok_or(QuotesError::CustomerNotFound)?;

    Ok(Json(CustomerResponse::from(&customer)))
}

/// PUT /api/customers/{id}
pub async fn update_customer<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
    Json(req): Json<CustomerRequest>,
) -> QuotesResult<Json<CustomerResponse>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let mut customer =
        CustomerRepository::find_by_id(state.repo.as_ref(), &CustomerId::from_uuid(id))
            .await?
            .ok_or(QuotesError::CustomerNotFound)?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(QuotesError::Validation("Customer name is required".into()));
    }

    customer.name = name;
    customer.email = req.email;
    customer.phone = req.phone;
    customer.address = req.address;
    customer.tax_office = req.tax_office;
    customer.tax_number = req.tax_number;
    customer.touch();

    CustomerRepository::update(state.repo.as_ref(), &customer).await?;

    Ok(Json(CustomerResponse::from(&customer)))
}

/// DELETE /api/customers/{id}
pub async fn delete_customer<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
) -> QuotesResult<StatusCode>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let deleted =
        CustomerRepository::delete(state.repo.as_ref(), &CustomerId::from_uuid(id)).await?;

    if !deleted {
        return Err(QuotesError::CustomerNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Products
// ============================================================================

/// POST /api/products
pub async fn create_product<R>(
    State(state): State<QuotesAppState<R>>,
    Json(req): Json<ProductRequest>,
) -> QuotesResult<(StatusCode, Json<ProductResponse>)>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(QuotesError::Validation("Product name is required".into()));
    }
    if !req.unit_price.is_finite() || req.unit_price < 0.0 {
        return Err(QuotesError::Validation(
            "Unit price must be zero or positive".into(),
        ));
    }

    let tax_percent = match req.tax_percent {
        Some(rate) => clamp_percent(Some(rate)),
        None => state.config.default_tax_percent,
    };

    let mut product = Product::new(name, req.unit_price, req.currency, tax_percent);
    product.description = req.description;

    ProductRepository::create(state.repo.as_ref(), &product).await?;

    tracing::info!(product_id = %product.product_id, "Product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// GET /api/products
pub async fn list_products<R>(
    State(state): State<QuotesAppState<R>>,
) -> QuotesResult<Json<Vec<ProductResponse>>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let products = ProductRepository::list(state.repo.as_ref()).await?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// GET /api/products/{id}
pub async fn get_product<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
) -> QuotesResult<Json<ProductResponse>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let product = ProductRepository::find_by_id(state.repo.as_ref(), &ProductId::from_uuid(id))
        .await?
        .ok_or(QuotesError::ProductNotFound)?;

    Ok(Json(ProductResponse::from(&product)))
}

/// PUT /api/products/{id}
pub async fn update_product<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProductRequest>,
) -> QuotesResult<Json<ProductResponse>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let mut product = ProductRepository::find_by_id(state.repo.as_ref(), &ProductId::from_uuid(id))
        .await?
        .ok_or(QuotesError::ProductNotFound)?;

    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(QuotesError::Validation("Product name is required".into()));
    }
    if !req.unit_price.is_finite() || req.unit_price < 0.0 {
        return Err(QuotesError::Validation(
            "Unit price must be zero or positive".into(),
        ));
    }

    product.name = name;
    product.description = req.description;
    product.unit_price = req.unit_price;
    product.currency = req.currency;
    if let Some(rate) = req.tax_percent {
        product.tax_percent = clamp_percent(Some(rate));
    }
    product.touch();

    ProductRepository::update(state.repo.as_ref(), &product).await?;

    Ok(Json(ProductResponse::from(&product)))
}

/// DELETE /api/products/{id}
pub async fn delete_product<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
) -> QuotesResult<StatusCode>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let deleted = ProductRepository::delete(state.repo.as_ref(), &ProductId::from_uuid(id)).await?;

    if !deleted {
        return Err(QuotesError::ProductNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Quotations
// ============================================================================

/// Query params for quotation listing
#[derive(Debug, Deserialize)]
pub struct QuotationListQuery {
    /// Restrict to one customer
    pub customer: Option<Uuid>,
}

/// POST /api/quotations
pub async fn create_quotation<R>(
    State(state): State<QuotesAppState<R>>,
    Json(req): Json<QuotationRequest>,
) -> QuotesResult<(StatusCode, Json<QuotationResponse>)>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let use_case = SaveQuotationUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let current_rate = state.rates.usd_to_tl_rate().await;
    let input = quotation_input(req);

    let output = use_case.create(input, current_rate).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuotationResponse::from_parts(&output.quotation, &output.totals)),
    ))
}

/// GET /api/quotations
pub async fn list_quotations<R>(
    State(state): State<QuotesAppState<R>>,
    Query(query): Query<QuotationListQuery>,
) -> QuotesResult<Json<Vec<QuotationResponse>>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let quotations = match query.customer {
        Some(customer_id) => {
            QuotationRepository::list_for_customer(
                state.repo.as_ref(),
                &CustomerId::from_uuid(customer_id),
            )
            .await?
        }
        None => QuotationRepository::list(state.repo.as_ref()).await?,
    };

    let responses = quotations
        .iter()
        .map(|q| QuotationResponse::from_parts(q, &q.totals()))
        .collect();

    Ok(Json(responses))
}

/// GET /api/quotations/{id}
pub async fn get_quotation<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
) -> QuotesResult<Json<QuotationResponse>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let quotation =
        QuotationRepository::find_by_id(state.repo.as_ref(), &QuotationId::from_uuid(id))
            .await?
            .ok_or(QuotesError::QuotationNotFound)?;

    let totals = quotation.totals();
    Ok(Json(QuotationResponse::from_parts(&quotation, &totals)))
}

/// PUT /api/quotations/{id}
pub async fn update_quotation<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
    Json(req): Json<QuotationRequest>,
) -> QuotesResult<Json<QuotationResponse>>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let use_case = SaveQuotationUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = quotation_input(req);
    let output = use_case.update(&QuotationId::from_uuid(id), input).await?;

    Ok(Json(QuotationResponse::from_parts(
        &output.quotation,
        &output.totals,
    )))
}

/// DELETE /api/quotations/{id}
pub async fn delete_quotation<R>(
    State(state): State<QuotesAppState<R>>,
    Path(id): Path<Uuid>,
) -> QuotesResult<StatusCode>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let deleted =
        QuotationRepository::delete(state.repo.as_ref(), &QuotationId::from_uuid(id)).await?;

    if !deleted {
        return Err(QuotesError::QuotationNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Exchange Rate
// ============================================================================

/// GET /api/rates/usd
pub async fn current_usd_rate<R>(
    State(state): State<QuotesAppState<R>>,
) -> QuotesResult<impl IntoResponse>
where
    R: CustomerRepository + ProductRepository + QuotationRepository + Clone + Send + Sync + 'static,
{
    let rate = state.rates.usd_to_tl_rate().await;
    Ok(Json(ExchangeRateResponse { rate }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn quotation_input(req: QuotationRequest) -> SaveQuotationInput {
    SaveQuotationInput {
        customer_id: CustomerId::from_uuid(req.customer_id),
        title: req.title,
        items: req.items.into_iter().map(|i| i.into_draft()).collect(),
        tax_enabled: req.kdv_enabled,
        default_tax_percent: req.kdv_rate,
        global_discount_percent: req.total_discount,
        exchange_rate: req.exchange_rate,
        notes: req.notes,
        valid_until: req.valid_until,
    }
}
