//! Save Quotation Use Case
//!
//! Creating and updating quotations share the same shape: normalize the
//! submitted line items once, recompute the totals server-side, persist.
//! Client-supplied totals are never trusted or stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, QuotationId};

use crate::application::config::QuotesConfig;
use crate::domain::entities::Quotation;
use crate::domain::repository::{CustomerRepository, QuotationRepository};
use crate::domain::totals::QuotationTotals;
use crate::domain::value_objects::{LineItem, LineItemDraft, clamp_percent};
use crate::error::{QuotesError, QuotesResult};

/// Input for creating or replacing a quotation
pub struct SaveQuotationInput {
    pub customer_id: CustomerId,
    pub title: Option<String>,
    pub items: Vec<LineItemDraft>,
    pub tax_enabled: bool,
    /// Document default tax rate; `None` takes the configured default
    pub default_tax_percent: Option<f64>,
    pub global_discount_percent: Option<f64>,
    /// TL per 1 USD; `None` takes the caller-resolved current rate
    pub exchange_rate: Option<f64>,
    pub notes: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// Output with the entity and the full per-currency breakdown
pub struct SaveQuotationOutput {
    pub quotation: Quotation,
    pub totals: QuotationTotals,
}

/// Save quotation use case
pub struct SaveQuotationUseCase<Q, C>
where
    Q: QuotationRepository,
    C: CustomerRepository,
{
    quotation_repo: Arc<Q>,
    customer_repo: Arc<C>,
    config: Arc<QuotesConfig>,
}

impl<Q, C> SaveQuotationUseCase<Q, C>
where
    Q: QuotationRepository,
    C: CustomerRepository,
{
    pub fn new(quotation_repo: Arc<Q>, customer_repo: Arc<C>, config: Arc<QuotesConfig>) -> Self {
        Self {
            quotation_repo,
            customer_repo,
            config,
        }
    }

    /// Create a new quotation
    ///
    /// `current_rate` is the freshly resolved USD→TL rate, used when the
    /// request does not pin one.
    pub async fn create(
        &self,
        input: SaveQuotationInput,
        current_rate: f64,
    ) -> QuotesResult<SaveQuotationOutput> {
        self.ensure_customer_exists(&input.customer_id).await?;

        let default_tax = match input.default_tax_percent {
            Some(rate) => clamp_percent(Some(rate)),
            None => self.config.default_tax_percent,
        };
        let exchange_rate = normalize_rate(input.exchange_rate, current_rate);

        let mut quotation = Quotation::new(input.customer_id, default_tax, exchange_rate);
        apply_input(&mut quotation, input);

        let totals = quotation.recompute_totals();
        self.quotation_repo.create(&quotation).await?;

        tracing::info!(
            quotation_id = %quotation.quotation_id,
            customer_id = %quotation.customer_id,
            items = quotation.items.len(),
            total_tl = quotation.total_tl,
            total_usd = quotation.total_usd,
            "Quotation created"
        );

        Ok(SaveQuotationOutput { quotation, totals })
    }

    /// Replace an existing quotation's content
    ///
    /// The stored exchange rate is kept unless the request pins a new one.
    pub async fn update(
        &self,
        quotation_id: &QuotationId,
        input: SaveQuotationInput,
    ) -> QuotesResult<SaveQuotationOutput> {
        let mut quotation = self
            .quotation_repo
            .find_by_id(quotation_id)
            .await?
            .ok_or(QuotesError::QuotationNotFound)?;

        if quotation.customer_id != input.customer_id {
            self.ensure_customer_exists(&input.customer_id).await?;
            quotation.customer_id = input.customer_id;
        }

        if let Some(default_tax) = input.default_tax_percent {
            quotation.default_tax_percent = clamp_percent(Some(default_tax));
        }
        quotation.exchange_rate = normalize_rate(input.exchange_rate, quotation.exchange_rate);

        apply_input(&mut quotation, input);

        let totals = quotation.recompute_totals();
        self.quotation_repo.update(&quotation).await?;

        tracing::info!(
            quotation_id = %quotation.quotation_id,
            items = quotation.items.len(),
            total_tl = quotation.total_tl,
            total_usd = quotation.total_usd,
            "Quotation updated"
        );

        Ok(SaveQuotationOutput { quotation, totals })
    }

    async fn ensure_customer_exists(&self, customer_id: &CustomerId) -> QuotesResult<()> {
        self.customer_repo
            .find_by_id(customer_id)
            .await?
            .map(|_| ())
            .ok_or(QuotesError::CustomerNotFound)
    }
}

/// Copy the request fields shared by create and update onto the entity
fn apply_input(quotation: &mut Quotation, input: SaveQuotationInput) {
    quotation.title = input.title;
    quotation.notes = input.notes;
    quotation.valid_until = input.valid_until;
    quotation.tax_enabled = input.tax_enabled;
    quotation.global_discount_percent = clamp_percent(input.global_discount_percent);
    quotation.items = input
        .items
        .into_iter()
        .map(LineItem::normalized)
        .collect();
}

/// A pinned rate must be positive and finite; otherwise use the fallback
fn normalize_rate(requested: Option<f64>, fallback: f64) -> f64 {
    match requested {
        Some(rate) if rate.is_finite() && rate > 0.0 => rate,
        _ => fallback,
    }
}
