//! Sales list and sale maintenance.
//!
//! The list is built from an optional filter taken from the raw query string.
//! A filter that fails to parse, or that names a client which does not exist,
//! is dropped as a whole and the unfiltered list is shown instead.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::product::format_cents;
use crate::domain::sale::{Sale, SaleDetails, SaleFilter};
use crate::forms::sales::{SaleForm, parse_filter};
use crate::repository::{ClientReader, ProductReader, SaleReader, SaleWriter};
use crate::services::products::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// View model for one row of the sales list.
#[derive(Debug, Serialize)]
pub struct SaleView {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price_formatted: String,
    pub total_value_cents: i64,
    pub total_value_formatted: String,
    pub created_at: NaiveDateTime,
}

impl From<SaleDetails> for SaleView {
    fn from(details: SaleDetails) -> Self {
        let SaleDetails {
            sale,
            client,
            product,
            total_value_cents,
        } = details;

        Self {
            id: sale.id,
            client_id: client.id,
            client_name: client.name,
            product_id: product.id,
            unit_price_formatted: product.price_display(),
            product_name: product.name,
            quantity: sale.quantity,
            total_value_cents,
            total_value_formatted: format_cents(total_value_cents),
            created_at: sale.created_at,
        }
    }
}

/// Data required to render the sales list.
#[derive(Debug)]
pub struct SalesPageData {
    /// Sales matching the applied filter.
    pub sales: Vec<SaleView>,
    /// Every client, for the filter dropdown.
    pub clients: Vec<Client>,
    /// The filter that was actually applied; empty when the request's was discarded.
    pub filter: SaleFilter,
}

/// Options offered by the create and edit sale forms.
#[derive(Debug)]
pub struct SaleFormOptions {
    pub clients: Vec<Client>,
    pub products: Vec<ProductView>,
}

/// Builds the sales list for the raw query string of the request.
pub fn list_sales<R>(repo: &R, raw_query: &str) -> ServiceResult<SalesPageData>
where
    R: SaleReader + ClientReader + ?Sized,
{
    let filter = resolve_filter(repo, raw_query)?;

    let sales = repo
        .list_sales(filter)
        .map_err(ServiceError::from)?
        .into_iter()
        .map(SaleView::from)
        .collect();
    let clients = repo.list_clients().map_err(ServiceError::from)?;

    Ok(SalesPageData {
        sales,
        clients,
        filter,
    })
}

fn resolve_filter<R>(repo: &R, raw_query: &str) -> ServiceResult<SaleFilter>
where
    R: ClientReader + ?Sized,
{
    let Some(filter) = parse_filter(raw_query) else {
        log::debug!("Discarding invalid sales filter `{raw_query}`");
        return Ok(SaleFilter::new());
    };

    if let Some(client_id) = filter.client_id {
        let client = repo
            .get_client_by_id(client_id)
            .map_err(ServiceError::from)?;
        if client.is_none() {
            log::debug!("Discarding sales filter for unknown client {client_id}");
            return Ok(SaleFilter::new());
        }
    }

    Ok(filter)
}

/// Loads a single sale with its client and product.
pub fn load_sale<R>(repo: &R, sale_id: i32) -> ServiceResult<SaleView>
where
    R: SaleReader + ?Sized,
{
    repo.get_sale_by_id(sale_id)
        .map_err(ServiceError::from)?
        .map(SaleView::from)
        .ok_or(ServiceError::NotFound)
}

/// Loads the clients and products offered by the sale forms.
pub fn load_sale_form_options<R>(repo: &R) -> ServiceResult<SaleFormOptions>
where
    R: ClientReader + ProductReader + ?Sized,
{
    let clients = repo.list_clients().map_err(ServiceError::from)?;
    let products = repo
        .list_products()
        .map_err(ServiceError::from)?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(SaleFormOptions { clients, products })
}

/// Records a new sale for an existing client and product.
pub fn create_sale<R>(repo: &R, form: SaleForm) -> ServiceResult<Sale>
where
    R: SaleWriter + ClientReader + ProductReader + ?Sized,
{
    let new_sale = form
        .into_new_sale()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references_exist(repo, new_sale.client_id, new_sale.product_id)?;

    repo.create_sale(&new_sale).map_err(ServiceError::from)
}

/// Updates the client, product and quantity of a sale. Its timestamp is kept.
pub fn modify_sale<R>(repo: &R, sale_id: i32, form: SaleForm) -> ServiceResult<Sale>
where
    R: SaleWriter + ClientReader + ProductReader + ?Sized,
{
    let updates = form
        .into_update_sale()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_references_exist(repo, updates.client_id, updates.product_id)?;

    repo.update_sale(sale_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a sale.
pub fn remove_sale<R>(repo: &R, sale_id: i32) -> ServiceResult<()>
where
    R: SaleWriter + ?Sized,
{
    repo.delete_sale(sale_id).map_err(ServiceError::from)
}

fn ensure_references_exist<R>(repo: &R, client_id: i32, product_id: i32) -> ServiceResult<()>
where
    R: ClientReader + ProductReader + ?Sized,
{
    if repo
        .get_client_by_id(client_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::Form(format!("client {client_id} does not exist")));
    }

    if repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::Form(format!(
            "product {product_id} does not exist"
        )));
    }

    Ok(())
}
