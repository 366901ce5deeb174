//! Domain Value Objects
//!
//! Immutable value types for the quotation domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Currency of a price or a total
///
/// Quotations mix Turkish lira and US dollar lines; the two are summed
/// separately and never merged into one figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "TL")]
    Tl,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Tl => "TL",
            Currency::Usd => "USD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TL" => Some(Currency::Tl),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Loose line-item fields as submitted by the editing UI
///
/// Everything numeric is optional; [`LineItem::normalized`] turns a draft
/// into a strict value exactly once, so no downstream code re-coerces.
#[derive(Debug, Clone, Default)]
pub struct LineItemDraft {
    pub product_id: Option<Uuid>,
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub currency: Currency,
    pub discount_percent: Option<f64>,
    pub tax_percent: Option<f64>,
}

/// One product/quantity/price row within a quotation
///
/// Always well-formed: quantity ≥ 1, unit price ≥ 0 and finite, percentages
/// within 0..=100. Construct via [`LineItem::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Option<Uuid>,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub currency: Currency,
    pub discount_percent: f64,
    pub tax_percent: f64,
}

impl LineItem {
    /// Normalize a draft into a strict line item
    ///
    /// Coercion rules:
    /// - quantity: missing, non-finite, or < 1 becomes 1 (fractions truncate)
    /// - unit price: missing, non-finite, or negative becomes 0
    /// - discount and tax: missing becomes 0, otherwise clamped to 0..=100
    pub fn normalized(draft: LineItemDraft) -> Self {
        let quantity = match draft.quantity {
            Some(q) if q.is_finite() && q >= 1.0 => q.trunc() as u32,
            _ => 1,
        };

        let unit_price = match draft.unit_price {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            _ => 0.0,
        };

        Self {
            product_id: draft.product_id,
            description: draft.description.unwrap_or_default(),
            quantity,
            unit_price,
            currency: draft.currency,
            discount_percent: clamp_percent(draft.discount_percent),
            tax_percent: clamp_percent(draft.tax_percent),
        }
    }

    /// Row total after the per-line discount, before tax
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price * (1.0 - self.discount_percent / 100.0)
    }

    /// Tax amount for this row (own rate, applied to the discounted total)
    pub fn tax_amount(&self) -> f64 {
        self.line_total() * self.tax_percent / 100.0
    }
}

/// Clamp an optional percentage into 0..=100, treating absent/invalid as 0
pub(crate) fn clamp_percent(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Tl.code(), "TL");
        assert_eq!(Currency::Usd.code(), "USD");
        assert_eq!(Currency::from_code("TL"), Some(Currency::Tl));
        assert_eq!(Currency::from_code("USD"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("EUR"), None);
    }

    #[test]
    fn test_currency_serde() {
        assert_eq!(serde_json::to_string(&Currency::Tl).unwrap(), "\"TL\"");
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        let c: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(c, Currency::Usd);
    }

    #[test]
    fn test_normalized_defaults() {
        let item = LineItem::normalized(LineItemDraft::default());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.discount_percent, 0.0);
        assert_eq!(item.tax_percent, 0.0);
        assert_eq!(item.currency, Currency::Tl);
    }

    #[test]
    fn test_normalized_invalid_quantity() {
        for bad in [Some(0.0), Some(-3.0), Some(f64::NAN), Some(f64::INFINITY), None] {
            let item = LineItem::normalized(LineItemDraft {
                quantity: bad,
                ..Default::default()
            });
            assert_eq!(item.quantity, 1, "quantity {:?} should coerce to 1", bad);
        }
    }

    #[test]
    fn test_normalized_truncates_fractional_quantity() {
        let item = LineItem::normalized(LineItemDraft {
            quantity: Some(2.9),
            ..Default::default()
        });
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_normalized_invalid_price() {
        for bad in [Some(-10.0), Some(f64::NAN), None] {
            let item = LineItem::normalized(LineItemDraft {
                unit_price: bad,
                ..Default::default()
            });
            assert_eq!(item.unit_price, 0.0, "price {:?} should coerce to 0", bad);
        }
    }

    #[test]
    fn test_percent_clamping() {
        let item = LineItem::normalized(LineItemDraft {
            discount_percent: Some(150.0),
            tax_percent: Some(-5.0),
            ..Default::default()
        });
        assert_eq!(item.discount_percent, 100.0);
        assert_eq!(item.tax_percent, 0.0);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::normalized(LineItemDraft {
            quantity: Some(2.0),
            unit_price: Some(100.0),
            discount_percent: Some(10.0),
            ..Default::default()
        });
        assert!((item.line_total() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_tax_amount_uses_discounted_total() {
        let item = LineItem::normalized(LineItemDraft {
            quantity: Some(1.0),
            unit_price: Some(50.0),
            discount_percent: Some(10.0),
            tax_percent: Some(10.0),
            ..Default::default()
        });
        // 45 after discount, 10% tax on that
        assert!((item.tax_amount() - 4.5).abs() < 1e-9);
    }
}
