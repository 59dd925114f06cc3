use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale::{
    NewSale as DomainNewSale, Sale as DomainSale, SaleDetails as DomainSaleDetails,
    UpdateSale as DomainUpdateSale,
};
use crate::models::client::Client;
use crate::models::product::Product;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::sales)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
pub struct Sale {
    pub id: i32,
    pub client_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sales)]
pub struct NewSale {
    pub client_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

/// Changeset for a sale. `created_at` is not part of it.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::sales)]
pub struct UpdateSale {
    pub client_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl From<Sale> for DomainSale {
    fn from(value: Sale) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            product_id: value.product_id,
            quantity: value.quantity,
            created_at: value.created_at,
        }
    }
}

impl From<(Sale, Client, Product)> for DomainSaleDetails {
    fn from((sale, client, product): (Sale, Client, Product)) -> Self {
        DomainSaleDetails::new(sale.into(), client.into(), product.into())
    }
}

impl From<&DomainNewSale> for NewSale {
    fn from(value: &DomainNewSale) -> Self {
        Self {
            client_id: value.client_id,
            product_id: value.product_id,
            quantity: value.quantity,
            created_at: value.created_at,
        }
    }
}

impl From<&DomainUpdateSale> for UpdateSale {
    fn from(value: &DomainUpdateSale) -> Self {
        Self {
            client_id: value.client_id,
            product_id: value.product_id,
            quantity: value.quantity,
        }
    }
}
