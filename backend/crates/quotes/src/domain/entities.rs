//! Domain Entities
//!
//! Core business entities for the quotation domain.

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ProductId, QuotationId};

use crate::domain::totals::{QuotationTotals, TotalsContext, calculate_totals};
use crate::domain::value_objects::{Currency, LineItem};

/// Customer entity - a company or person quotations are issued to
#[derive(Debug, Clone)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Tax office (vergi dairesi)
    pub tax_office: Option<String>,
    /// Tax number (vergi numarası)
    pub tax_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            customer_id: CustomerId::new(),
            name,
            email: None,
            phone: None,
            address: None,
            tax_office: None,
            tax_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Product entity - a catalog item that can be added to quotations
#[derive(Debug, Clone)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: f64,
    pub currency: Currency,
    /// Default tax rate applied when the product is added to a quotation
    pub tax_percent: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, unit_price: f64, currency: Currency, tax_percent: f64) -> Self {
        let now = Utc::now();
        Self {
            product_id: ProductId::new(),
            name,
            description: None,
            unit_price,
            currency,
            tax_percent,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Quotation entity - a priced offer to a customer
///
/// `total_tl` / `total_usd` are derived from the item list and settings;
/// [`Quotation::recompute_totals`] must run before every persist so the
/// stored figures are always a pure function of the stored inputs.
#[derive(Debug, Clone)]
pub struct Quotation {
    pub quotation_id: QuotationId,
    pub customer_id: CustomerId,
    pub title: Option<String>,
    pub items: Vec<LineItem>,
    /// Whether tax applies to this quotation at all
    pub tax_enabled: bool,
    /// Document default tax rate (kdvRate): seeds newly added items in the
    /// editor, never an input to the totals computation
    pub default_tax_percent: f64,
    /// Global discount applied on top of per-line discounts (0..=100)
    pub global_discount_percent: f64,
    /// TL per 1 USD at edit time; display-only
    pub exchange_rate: f64,
    /// Persisted TL total (derived)
    pub total_tl: f64,
    /// Persisted USD total (derived)
    pub total_usd: f64,
    pub notes: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quotation {
    pub fn new(
        customer_id: CustomerId,
        default_tax_percent: f64,
        exchange_rate: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            quotation_id: QuotationId::new(),
            customer_id,
            title: None,
            items: Vec::new(),
            tax_enabled: true,
            default_tax_percent,
            global_discount_percent: 0.0,
            exchange_rate,
            total_tl: 0.0,
            total_usd: 0.0,
            notes: None,
            valid_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute and store the derived totals from the current items
    ///
    /// Returns the full per-currency breakdown for API responses; only the
    /// final totals live on the entity.
    pub fn recompute_totals(&mut self) -> QuotationTotals {
        let totals = calculate_totals(
            &self.items,
            &TotalsContext {
                tax_enabled: self.tax_enabled,
                global_discount_percent: self.global_discount_percent,
                exchange_rate: self.exchange_rate,
            },
        );

        self.total_tl = totals.total_tl;
        self.total_usd = totals.total_usd;
        self.updated_at = Utc::now();

        totals
    }

    /// The current breakdown without mutating the entity
    pub fn totals(&self) -> QuotationTotals {
        calculate_totals(
            &self.items,
            &TotalsContext {
                tax_enabled: self.tax_enabled,
                global_discount_percent: self.global_discount_percent,
                exchange_rate: self.exchange_rate,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::LineItemDraft;

    #[test]
    fn test_recompute_totals_updates_persisted_fields() {
        let mut quotation = Quotation::new(CustomerId::new(), 20.0, 30.0);
        quotation.items = vec![LineItem::normalized(LineItemDraft {
            quantity: Some(2.0),
            unit_price: Some(100.0),
            tax_percent: Some(20.0),
            ..Default::default()
        })];

        let totals = quotation.recompute_totals();

        assert!((quotation.total_tl - 240.0).abs() < 1e-9);
        assert_eq!(quotation.total_tl, totals.total_tl);
        assert_eq!(quotation.total_usd, 0.0);
    }

    #[test]
    fn test_totals_is_read_only() {
        let mut quotation = Quotation::new(CustomerId::new(), 20.0, 30.0);
        quotation.items = vec![LineItem::normalized(LineItemDraft {
            unit_price: Some(10.0),
            ..Default::default()
        })];

        let before = quotation.total_tl;
        let _ = quotation.totals();
        assert_eq!(quotation.total_tl, before);
    }

    #[test]
    fn test_default_tax_rate_does_not_drive_totals() {
        // The document default seeds new items in the editor; an item with
        // its own rate is unaffected by it
        let mut quotation = Quotation::new(CustomerId::new(), 20.0, 30.0);
        quotation.items = vec![LineItem::normalized(LineItemDraft {
            unit_price: Some(100.0),
            tax_percent: Some(10.0),
            ..Default::default()
        })];

        let totals = quotation.recompute_totals();
        assert!((totals.tax_amount_tl - 10.0).abs() < 1e-9);
    }
}
