//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CustomerId, ProductId, QuotationId};

use crate::domain::entities::{Customer, Product, Quotation};
use crate::error::QuotesResult;

/// Customer repository trait
#[trait_variant::make(CustomerRepository: Send)]
pub trait LocalCustomerRepository {
    /// Create a new customer
    async fn create(&self, customer: &Customer) -> QuotesResult<()>;

    /// Find customer by ID
    async fn find_by_id(&self, customer_id: &CustomerId) -> QuotesResult<Option<Customer>>;

    /// List all customers, newest first
    async fn list(&self) -> QuotesResult<Vec<Customer>>;

    /// Update customer
    async fn update(&self, customer: &Customer) -> QuotesResult<()>;

    /// Delete customer (fails while quotations still reference it)
    async fn delete(&self, customer_id: &CustomerId) -> QuotesResult<bool>;
}

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Create a new product
    async fn create(&self, product: &Product) -> QuotesResult<()>;

    /// Find product by ID
    async fn find_by_id(&self, product_id: &ProductId) -> QuotesResult<Option<Product>>;

    /// List all products, newest first
    async fn list(&self) -> QuotesResult<Vec<Product>>;

    /// Update product
    async fn update(&self, product: &Product) -> QuotesResult<()>;

    /// Delete product
    async fn delete(&self, product_id: &ProductId) -> QuotesResult<bool>;
}

/// Quotation repository trait
#[trait_variant::make(QuotationRepository: Send)]
pub trait LocalQuotationRepository {
    /// Create a new quotation
    async fn create(&self, quotation: &Quotation) -> QuotesResult<()>;

    /// Find quotation by ID
    async fn find_by_id(&self, quotation_id: &QuotationId) -> QuotesResult<Option<Quotation>>;

    /// List all quotations, newest first
    async fn list(&self) -> QuotesResult<Vec<Quotation>>;

    /// List quotations for one customer, newest first
    async fn list_for_customer(&self, customer_id: &CustomerId) -> QuotesResult<Vec<Quotation>>;

    /// Update quotation
    async fn update(&self, quotation: &Quotation) -> QuotesResult<()>;

    /// Delete quotation
    async fn delete(&self, quotation_id: &QuotationId) -> QuotesResult<bool>;
}
