//! Quotation Totals
//!
//! Pure computation of the figures shown in the editor and persisted with a
//! quotation. Safe to call on every keystroke: no I/O, no shared state, and
//! identical inputs always produce identical outputs.
//!
//! TL and USD lines are summed into separate buckets and never merged; the
//! exchange rate travels with the quotation for display-time conversion only.
//! Intermediate figures are not rounded before the global discount is applied,
//! so rounding error never compounds; display formatting rounds at the edge.

use crate::domain::value_objects::{Currency, LineItem, clamp_percent};

/// Global settings the calculator needs besides the items themselves
#[derive(Debug, Clone, Copy)]
pub struct TotalsContext {
    /// Whether tax is applied at all
    pub tax_enabled: bool,
    /// Single document-wide discount applied after tax (0..=100)
    pub global_discount_percent: f64,
    /// TL per 1 USD; carried for display, never used to merge currencies
    pub exchange_rate: f64,
}

/// Per-currency computed figures
///
/// Derived state: recomputed from the item list on every change, with only
/// the final totals persisted on the quotation row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuotationTotals {
    pub subtotal_tl: f64,
    pub subtotal_usd: f64,
    pub tax_amount_tl: f64,
    pub tax_amount_usd: f64,
    pub total_tl: f64,
    pub total_usd: f64,
}

impl QuotationTotals {
    /// Everything expressed in TL for display purposes
    ///
    /// The only place the exchange rate touches a number; stored totals stay
    /// per-currency.
    pub fn display_total_tl(&self, exchange_rate: f64) -> f64 {
        self.total_tl + self.total_usd * exchange_rate
    }
}

/// Compute per-currency subtotal, tax, and final totals for a quotation
///
/// Steps:
/// 1. Sum discounted line totals into a bucket per currency.
/// 2. When tax is enabled, sum each item's own tax amount per currency
///    (per-item rates, never one blended document rate).
/// 3. Apply the global discount multiplicatively to each gross total.
pub fn calculate_totals(items: &[LineItem], ctx: &TotalsContext) -> QuotationTotals {
    let mut totals = QuotationTotals::default();

    for item in items {
        let line_total = item.line_total();
        let tax_amount = if ctx.tax_enabled { item.tax_amount() } else { 0.0 };

        match item.currency {
            Currency::Tl => {
                totals.subtotal_tl += line_total;
                totals.tax_amount_tl += tax_amount;
            }
            Currency::Usd => {
                totals.subtotal_usd += line_total;
                totals.tax_amount_usd += tax_amount;
            }
        }
    }

    let discount_factor = 1.0 - clamp_percent(Some(ctx.global_discount_percent)) / 100.0;

    totals.total_tl = (totals.subtotal_tl + totals.tax_amount_tl) * discount_factor;
    totals.total_usd = (totals.subtotal_usd + totals.tax_amount_usd) * discount_factor;

    totals
}
