//! API DTOs (Data Transfer Objects)
//!
//! Request items arrive loose (optional numerics) and are normalized once at
//! the domain boundary; responses carry the strict values plus the computed
//! per-currency breakdown. `totalTL`/`totalUSD` keep their historical casing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Customer, Product, Quotation};
use crate::domain::totals::QuotationTotals;
use crate::domain::value_objects::{Currency, LineItem, LineItemDraft};

// ============================================================================
// Customers
// ============================================================================

/// Create/update customer request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_office: Option<String>,
    pub tax_number: Option<String>,
}

/// Customer response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_office: Option<String>,
    pub tax_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: *customer.customer_id.as_uuid(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            tax_office: customer.tax_office.clone(),
            tax_number: customer.tax_number.clone(),
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Create/update product request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    #[serde(default)]
    pub currency: Currency,
    /// Per-item tax rate; `None` takes the configured default
    pub tax_percent: Option<f64>,
}

/// Product response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub currency: Currency,
    pub tax_percent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: *product.product_id.as_uuid(),
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price: product.unit_price,
            currency: product.currency,
            tax_percent: product.tax_percent,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// ============================================================================
// Quotations
// ============================================================================

/// One line item as submitted by the editor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: Option<Uuid>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
    pub discount_percent: Option<f64>,
    pub tax_percent: Option<f64>,
}

impl LineItemRequest {
    pub fn into_draft(self) -> LineItemDraft {
        LineItemDraft {
            product_id: self.product_id,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            currency: self.currency,
            discount_percent: self.discount_percent,
            tax_percent: self.tax_percent,
        }
    }
}

/// One normalized line item in a response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub currency: Currency,
    pub discount_percent: f64,
    pub tax_percent: f64,
    pub line_total: f64,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            currency: item.currency,
            discount_percent: item.discount_percent,
            tax_percent: item.tax_percent,
            line_total: item.line_total(),
        }
    }
}

/// Create/update quotation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationRequest {
    pub customer_id: Uuid,
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
    /// Whether tax applies (kdvEnabled)
    #[serde(default = "default_true")]
    pub kdv_enabled: bool,
    /// Document default tax rate (kdvRate); UI seed for new items only
    pub kdv_rate: Option<f64>,
    /// Global discount percent (totalDiscount)
    pub total_discount: Option<f64>,
    /// Pinned TL-per-USD rate; omitted means "use the current rate"
    pub exchange_rate: Option<f64>,
    pub notes: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Computed per-currency figures
#[derive(Debug, Clone, Serialize)]
pub struct TotalsResponse {
    #[serde(rename = "subtotalTL")]
    pub subtotal_tl: f64,
    #[serde(rename = "subtotalUSD")]
    pub subtotal_usd: f64,
    #[serde(rename = "taxAmountTL")]
    pub tax_amount_tl: f64,
    #[serde(rename = "taxAmountUSD")]
    pub tax_amount_usd: f64,
    #[serde(rename = "totalTL")]
    pub total_tl: f64,
    #[serde(rename = "totalUSD")]
    pub total_usd: f64,
}

impl From<&QuotationTotals> for TotalsResponse {
    fn from(totals: &QuotationTotals) -> Self {
        Self {
            subtotal_tl: totals.subtotal_tl,
            subtotal_usd: totals.subtotal_usd,
            tax_amount_tl: totals.tax_amount_tl,
            tax_amount_usd: totals.tax_amount_usd,
            total_tl: totals.total_tl,
            total_usd: totals.total_usd,
        }
    }
}

/// Quotation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub title: Option<String>,
    pub items: Vec<LineItemResponse>,
    pub kdv_enabled: bool,
    pub kdv_rate: f64,
    pub total_discount: f64,
    pub exchange_rate: f64,
    #[serde(flatten)]
    pub totals: TotalsResponse,
    pub notes: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuotationResponse {
    pub fn from_parts(quotation: &Quotation, totals: &QuotationTotals) -> Self {
        Self {
            id: *quotation.quotation_id.as_uuid(),
            customer_id: *quotation.customer_id.as_uuid(),
            title: quotation.title.clone(),
            items: quotation.items.iter().map(LineItemResponse::from).collect(),
            kdv_enabled: quotation.tax_enabled,
            kdv_rate: quotation.default_tax_percent,
            total_discount: quotation.global_discount_percent,
            exchange_rate: quotation.exchange_rate,
            totals: TotalsResponse::from(totals),
            notes: quotation.notes.clone(),
            valid_until: quotation.valid_until,
            created_at: quotation.created_at,
            updated_at: quotation.updated_at,
        }
    }
}

// ============================================================================
// Exchange Rate
// ============================================================================

/// Current USD→TL rate response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateResponse {
    /// TL per 1 USD
    pub rate: f64,
}
