//! PostgreSQL Repository Implementations
//!
//! One repository struct backs all three domain stores. Quotation line items
//! are persisted as a JSONB document on the quotation row; they are only ever
//! read and written as a whole with their quotation.

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ProductId, QuotationId};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{Customer, Product, Quotation};
use crate::domain::repository::{CustomerRepository, ProductRepository, QuotationRepository};
use crate::domain::value_objects::{Currency, LineItem};
use crate::error::{QuotesError, QuotesResult};

/// PostgreSQL-backed quotes repository
#[derive(Clone)]
pub struct PgQuotesRepository {
    pool: PgPool,
}

impl PgQuotesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Customer Repository Implementation
// ============================================================================

impl CustomerRepository for PgQuotesRepository {
    async fn create(&self, customer: &Customer) -> QuotesResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                customer_id,
                name,
                email,
                phone,
                address,
                tax_office,
                tax_number,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(customer.customer_id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.tax_office)
        .bind(&customer.tax_number)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, customer_id: &CustomerId) -> QuotesResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers WHERE customer_id = $1",
        )
        .bind(customer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn list(&self) -> QuotesResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerRow::into_customer).collect())
    }

    async fn update(&self, customer: &Customer) -> QuotesResult<()> {
        sqlx::query(
            r#"
            UPDATE customers SET
                name = $2,
                email = $3,
                phone = $4,
                address = $5,
                tax_office = $6,
                tax_number = $7,
                updated_at = $8
            WHERE customer_id = $1
            "#,
        )
        .bind(customer.customer_id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.tax_office)
        .bind(&customer.tax_number)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, customer_id: &CustomerId) -> QuotesResult<bool> {
        let in_use = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM quotations WHERE customer_id = $1)",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(QuotesError::CustomerInUse);
        }

        let deleted = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgQuotesRepository {
    async fn create(&self, product: &Product) -> QuotesResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id,
                name,
                description,
                unit_price,
                currency,
                tax_percent,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(product.currency.code())
        .bind(product.tax_percent)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> QuotesResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT * FROM products WHERE product_id = $1",
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn list(&self) -> QuotesResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT * FROM products ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn update(&self, product: &Product) -> QuotesResult<()> {
        sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                unit_price = $4,
                currency = $5,
                tax_percent = $6,
                updated_at = $7
            WHERE product_id = $1
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.unit_price)
        .bind(product.currency.code())
        .bind(product.tax_percent)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, product_id: &ProductId) -> QuotesResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Quotation Repository Implementation
// ============================================================================

impl QuotationRepository for PgQuotesRepository {
    async fn create(&self, quotation: &Quotation) -> QuotesResult<()> {
        sqlx::query(
            r#"
            INSERT INTO quotations (
                quotation_id,
                customer_id,
                title,
                items,
                tax_enabled,
                default_tax_percent,
                global_discount_percent,
                exchange_rate,
                total_tl,
                total_usd,
                notes,
                valid_until,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(quotation.quotation_id.as_uuid())
        .bind(quotation.customer_id.as_uuid())
        .bind(&quotation.title)
        .bind(Json(&quotation.items))
        .bind(quotation.tax_enabled)
        .bind(quotation.default_tax_percent)
        .bind(quotation.global_discount_percent)
        .bind(quotation.exchange_rate)
        .bind(quotation.total_tl)
        .bind(quotation.total_usd)
        .bind(&quotation.notes)
        .bind(quotation.valid_until)
        .bind(quotation.created_at)
        .bind(quotation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, quotation_id: &QuotationId) -> QuotesResult<Option<Quotation>> {
        let row = sqlx::query_as::<_, QuotationRow>(
            "SELECT * FROM quotations WHERE quotation_id = $1",
        )
        .bind(quotation_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(QuotationRow::into_quotation))
    }

    async fn list(&self) -> QuotesResult<Vec<Quotation>> {
        let rows = sqlx::query_as::<_, QuotationRow>(
            "SELECT * FROM quotations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuotationRow::into_quotation).collect())
    }

    async fn list_for_customer(&self, customer_id: &CustomerId) -> QuotesResult<Vec<Quotation>> {
        let rows = sqlx::query_as::<_, QuotationRow>(
            "SELECT * FROM quotations WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(QuotationRow::into_quotation).collect())
    }

    async fn update(&self, quotation: &Quotation) -> QuotesResult<()> {
        sqlx::query(
            r#"
            UPDATE quotations SET
                customer_id = $2,
                title = $3,
                items = $4,
                tax_enabled = $5,
                default_tax_percent = $6,
                global_discount_percent = $7,
                exchange_rate = $8,
                total_tl = $9,
                total_usd = $10,
                notes = $11,
                valid_until = $12,
                updated_at = $13
            WHERE quotation_id = $1
            "#,
        )
        .bind(quotation.quotation_id.as_uuid())
        .bind(quotation.customer_id.as_uuid())
        .bind(&quotation.title)
        .bind(Json(&quotation.items))
        .bind(quotation.tax_enabled)
        .bind(quotation.default_tax_percent)
        .bind(quotation.global_discount_percent)
        .bind(quotation.exchange_rate)
        .bind(quotation.total_tl)
        .bind(quotation.total_usd)
        .bind(&quotation.notes)
        .bind(quotation.valid_until)
        .bind(quotation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, quotation_id: &QuotationId) -> QuotesResult<bool> {
        let deleted = sqlx::query("DELETE FROM quotations WHERE quotation_id = $1")
            .bind(quotation_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CustomerRow {
    customer_id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    tax_office: Option<String>,
    tax_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self) -> Customer {
        Customer {
            customer_id: CustomerId::from_uuid(self.customer_id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            tax_office: self.tax_office,
            tax_number: self.tax_number,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    name: String,
    description: Option<String>,
    unit_price: f64,
    currency: String,
    tax_percent: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> QuotesResult<Product> {
        let currency = Currency::from_code(&self.currency).ok_or_else(|| {
            QuotesError::Internal(format!("Corrupt currency code in DB: {}", self.currency))
        })?;

        Ok(Product {
            product_id: ProductId::from_uuid(self.product_id),
            name: self.name,
            description: self.description,
            unit_price: self.unit_price,
            currency,
            tax_percent: self.tax_percent,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct QuotationRow {
    quotation_id: Uuid,
    customer_id: Uuid,
    title: Option<String>,
    items: Json<Vec<LineItem>>,
    tax_enabled: bool,
    default_tax_percent: f64,
    global_discount_percent: f64,
    exchange_rate: f64,
    total_tl: f64,
    total_usd: f64,
    notes: Option<String>,
    valid_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuotationRow {
    fn into_quotation(self) -> Quotation {
        Quotation {
            quotation_id: QuotationId::from_uuid(self.quotation_id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            title: self.title,
            items: self.items.0,
            tax_enabled: self.tax_enabled,
            default_tax_percent: self.default_tax_percent,
            global_discount_percent: self.global_discount_percent,
            exchange_rate: self.exchange_rate,
            total_tl: self.total_tl,
            total_usd: self.total_usd,
            notes: self.notes,
            valid_until: self.valid_until,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
