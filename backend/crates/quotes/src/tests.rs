//! Unit tests for the quotes crate
//! Crate-level tests covering DTO wire format and cross-module behavior;
//! calculator and normalization details live next to their modules.

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;

    #[test]
    fn test_default_config() {
        let config = QuotesConfig::default();

        assert_eq!(config.default_tax_percent, 20.0);
        assert_eq!(config.fallback_exchange_rate, 30.0);
        assert_eq!(config.exchange_rate_timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_contract_constants() {
        assert_eq!(DEFAULT_TAX_PERCENT, 20.0);
        assert_eq!(FALLBACK_EXCHANGE_RATE, 30.0);
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::domain::entities::Quotation;
    use crate::domain::value_objects::{Currency, LineItem, LineItemDraft};
    use crate::presentation::dto::*;
    use kernel::id::CustomerId;

    fn sample_quotation() -> Quotation {
        let mut quotation = Quotation::new(CustomerId::new(), 20.0, 30.0);
        quotation.items = vec![
            LineItem::normalized(LineItemDraft {
                quantity: Some(2.0),
                unit_price: Some(100.0),
                currency: Currency::Tl,
                tax_percent: Some(20.0),
                ..Default::default()
            }),
            LineItem::normalized(LineItemDraft {
                quantity: Some(1.0),
                unit_price: Some(40.0),
                currency: Currency::Usd,
                tax_percent: Some(20.0),
                ..Default::default()
            }),
        ];
        quotation.recompute_totals();
        quotation
    }

    #[test]
    fn test_quotation_response_field_names() {
        let quotation = sample_quotation();
        let totals = quotation.totals();
        let response = QuotationResponse::from_parts(&quotation, &totals);

        let json = serde_json::to_string(&response).unwrap();

        // Historical wire names must survive renames
        assert!(json.contains(r#""totalTL""#));
        assert!(json.contains(r#""totalUSD""#));
        assert!(json.contains(r#""subtotalTL""#));
        assert!(json.contains(r#""subtotalUSD""#));
        assert!(json.contains(r#""taxAmountTL""#));
        assert!(json.contains(r#""taxAmountUSD""#));
        assert!(json.contains(r#""kdvEnabled""#));
        assert!(json.contains(r#""kdvRate""#));
        assert!(json.contains(r#""totalDiscount""#));
        assert!(json.contains(r#""exchangeRate""#));
    }

    #[test]
    fn test_quotation_response_values() {
        let quotation = sample_quotation();
        let totals = quotation.totals();
        let response = QuotationResponse::from_parts(&quotation, &totals);

        assert!((response.totals.total_tl - 240.0).abs() < 1e-9);
        assert!((response.totals.total_usd - 48.0).abs() < 1e-9);
        assert_eq!(response.items.len(), 2);
        assert!((response.items[0].line_total - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_quotation_request_deserialization() {
        let json = r#"{
            "customerId": "00000000-0000-0000-0000-000000000000",
            "items": [
                {"quantity": 2, "unitPrice": 100.0, "currency": "TL", "taxPercent": 20}
            ],
            "kdvEnabled": true,
            "kdvRate": 20,
            "totalDiscount": 10,
            "exchangeRate": 32.5
        }"#;

        let request: QuotationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.items.len(), 1);
        assert!(request.kdv_enabled);
        assert_eq!(request.kdv_rate, Some(20.0));
        assert_eq!(request.total_discount, Some(10.0));
        assert_eq!(request.exchange_rate, Some(32.5));
    }

    #[test]
    fn test_quotation_request_defaults() {
        // Minimal payload: tax defaults on, everything else empty
        let json = r#"{"customerId": "00000000-0000-0000-0000-000000000000"}"#;
        let request: QuotationRequest = serde_json::from_str(json).unwrap();

        assert!(request.kdv_enabled);
        assert!(request.items.is_empty());
        assert!(request.kdv_rate.is_none());
        assert!(request.exchange_rate.is_none());
    }

    #[test]
    fn test_line_item_request_loose_fields() {
        // The editor may omit any numeric field
        let json = r#"{"description": "Montaj"}"#;
        let request: LineItemRequest = serde_json::from_str(json).unwrap();
        let draft = request.into_draft();

        assert_eq!(draft.description.as_deref(), Some("Montaj"));
        assert!(draft.quantity.is_none());
        assert!(draft.unit_price.is_none());
        assert_eq!(draft.currency, Currency::Tl);
    }

    #[test]
    fn test_customer_request_roundtrip() {
        let json = r#"{"name": "Acme Ltd", "taxOffice": "Kadıköy", "taxNumber": "1234567890"}"#;
        let request: CustomerRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.name, "Acme Ltd");
        assert_eq!(request.tax_office.as_deref(), Some("Kadıköy"));
        assert!(request.email.is_none());
    }

    #[test]
    fn test_product_request_default_currency() {
        let json = r#"{"name": "Kamera", "unitPrice": 1500.0}"#;
        let request: ProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.currency, Currency::Tl);
        assert!(request.tax_percent.is_none());
    }
}

#[cfg(test)]
mod persistence_shape_tests {
    use crate::domain::value_objects::{Currency, LineItem, LineItemDraft};

    #[test]
    fn test_line_item_json_roundtrip() {
        // Items are stored as a JSONB document; the serde shape is the
        // storage format
        let item = LineItem::normalized(LineItemDraft {
            product_id: Some(uuid::Uuid::new_v4()),
            description: Some("Kurulum".to_string()),
            quantity: Some(3.0),
            unit_price: Some(250.0),
            currency: Currency::Usd,
            discount_percent: Some(5.0),
            tax_percent: Some(20.0),
        });

        let json = serde_json::to_string(&item).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();

        assert_eq!(item, back);
        assert!(json.contains(r#""currency":"USD""#));
        assert!(json.contains(r#""unitPrice""#));
    }
}
