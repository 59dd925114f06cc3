use diesel::prelude::*;

use crate::{
    domain::sale::{
        NewSale as DomainNewSale, Sale as DomainSale, SaleDetails, SaleFilter,
        UpdateSale as DomainUpdateSale,
    },
    models::{
        client::Client as DbClient,
        product::Product as DbProduct,
        sale::{NewSale as DbNewSale, Sale as DbSale, UpdateSale as DbUpdateSale},
    },
    repository::{DieselRepository, RepositoryError, RepositoryResult, SaleReader, SaleWriter},
};

impl SaleReader for DieselRepository {
    fn get_sale_by_id(&self, id: i32) -> RepositoryResult<Option<SaleDetails>> {
        use crate::schema::{clients, products, sales};

        let mut conn = self.conn()?;
        let row = sales::table
            .inner_join(clients::table)
            .inner_join(products::table)
            .filter(sales::id.eq(id))
            .select((
                DbSale::as_select(),
                DbClient::as_select(),
                DbProduct::as_select(),
            ))
            .first::<(DbSale, DbClient, DbProduct)>(&mut conn)
            .optional()?;

        Ok(row.map(SaleDetails::from))
    }

    fn list_sales(&self, filter: SaleFilter) -> RepositoryResult<Vec<SaleDetails>> {
        use crate::schema::{clients, products, sales};

        let mut conn = self.conn()?;

        let mut items = sales::table
            .inner_join(clients::table)
            .inner_join(products::table)
            .select((
                DbSale::as_select(),
                DbClient::as_select(),
                DbProduct::as_select(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(client_id) = filter.client_id {
            items = items.filter(sales::client_id.eq(client_id));
        }

        // Timestamps are stored as ISO-8601 text, so comparing against midnight
        // bounds selects on the date component.
        if let Some(from) = filter.created_from() {
            items = items.filter(sales::created_at.ge(from));
        }

        if let Some(before) = filter.created_before() {
            items = items.filter(sales::created_at.lt(before));
        }

        let rows = items
            .order((sales::created_at.desc(), sales::id.desc()))
            .load::<(DbSale, DbClient, DbProduct)>(&mut conn)?;

        Ok(rows.into_iter().map(SaleDetails::from).collect())
    }
}

impl SaleWriter for DieselRepository {
    fn create_sale(&self, new_sale: &DomainNewSale) -> RepositoryResult<DomainSale> {
        use crate::schema::sales;

        let mut conn = self.conn()?;
        let db_new = DbNewSale::from(new_sale);

        let created = diesel::insert_into(sales::table)
            .values(&db_new)
            .get_result::<DbSale>(&mut conn)?;

        Ok(created.into())
    }

    fn update_sale(
        &self,
        sale_id: i32,
        updates: &DomainUpdateSale,
    ) -> RepositoryResult<DomainSale> {
        use crate::schema::sales;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateSale::from(updates);

        let target = sales::table.filter(sales::id.eq(sale_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbSale>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_sale(&self, sale_id: i32) -> RepositoryResult<()> {
        use crate::schema::sales;

        let mut conn = self.conn()?;
        let target = sales::table.filter(sales::id.eq(sale_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
