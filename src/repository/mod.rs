use crate::db::{DbConnection, DbPool};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::sale::{NewSale, Sale, SaleDetails, SaleFilter, UpdateSale};

pub mod client;
pub mod errors;
pub mod product;
pub mod sale;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over the product catalog.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

/// Write operations over the product catalog.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    /// Removes the product together with every sale referencing it.
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over client records.
pub trait ClientReader {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
    fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

/// Write operations over client records.
pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Client>;
    /// Removes the client together with every sale referencing it.
    fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over sales.
pub trait SaleReader {
    fn get_sale_by_id(&self, id: i32) -> RepositoryResult<Option<SaleDetails>>;
    /// Sales matching `filter`, each joined with its client and product in a single query.
    fn list_sales(&self, filter: SaleFilter) -> RepositoryResult<Vec<SaleDetails>>;
}

/// Write operations over sales.
pub trait SaleWriter {
    fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
    fn update_sale(&self, sale_id: i32, updates: &UpdateSale) -> RepositoryResult<Sale>;
    fn delete_sale(&self, sale_id: i32) -> RepositoryResult<()>;
}
