use serde::Serialize;

use crate::domain::product::Product;
use crate::forms::products::{ProductForm, UploadProductsForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// View model exposed to the product templates.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub price_formatted: String,
    pub stock: i32,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let price_formatted = product.price_display();
        let Product {
            id,
            name,
            description,
            price_cents,
            stock,
        } = product;

        Self {
            id,
            name,
            description,
            price_cents,
            price_formatted,
            stock,
        }
    }
}

/// Loads every product for the catalog list.
pub fn load_products<R>(repo: &R) -> ServiceResult<Vec<ProductView>>
where
    R: ProductReader + ?Sized,
{
    let products = repo.list_products().map_err(ServiceError::from)?;
    Ok(products.into_iter().map(ProductView::from).collect())
}

/// Loads a single product, failing with `NotFound` when it does not exist.
pub fn load_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .map(ProductView::from)
        .ok_or(ServiceError::NotFound)
}

/// Creates a new catalog product.
pub fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&new_product).map_err(ServiceError::from)
}

/// Replaces the editable fields of an existing product.
pub fn modify_product<R>(repo: &R, product_id: i32, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a product and, through the store's cascade, all of its sales.
pub fn remove_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)
}

/// Imports products from an uploaded CSV file. Returns the number created.
pub fn import_products<R>(repo: &R, form: &mut UploadProductsForm) -> ServiceResult<usize>
where
    R: ProductWriter + ?Sized,
{
    let new_products = form
        .into_new_products()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo
        .create_products(&new_products)
        .map_err(ServiceError::from)?;
    log::info!("Imported {created} product(s) from CSV");

    Ok(created)
}
