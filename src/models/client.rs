use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
pub struct NewClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub birth_date: NaiveDate,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub birth_date: NaiveDate,
}

impl From<Client> for DomainClient {
    fn from(value: Client) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            birth_date: value.birth_date,
        }
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(value: &'a DomainNewClient) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            birth_date: value.birth_date,
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(value: &'a DomainUpdateClient) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            birth_date: value.birth_date,
        }
    }
}
