use diesel::prelude::*;

use crate::{
    domain::client::{
        Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    repository::{ClientReader, ClientWriter, DieselRepository, RepositoryError, RepositoryResult},
};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::id.eq(id))
            .select(DbClient::as_select())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<DomainClient>> {
        use crate::schema::clients;

        let normalized_email = email.trim().to_lowercase();

        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::email.eq(normalized_email))
            .select(DbClient::as_select())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(&self) -> RepositoryResult<Vec<DomainClient>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_clients = clients::table
            .order((clients::name.asc(), clients::id.asc()))
            .select(DbClient::as_select())
            .load::<DbClient>(&mut conn)?;

        Ok(db_clients.into_iter().map(Into::into).collect())
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &DomainNewClient) -> RepositoryResult<DomainClient> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_new = DbNewClient::from(new_client);

        let created = diesel::insert_into(clients::table)
            .values(&db_new)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.into())
    }

    fn update_client(
        &self,
        client_id: i32,
        updates: &DomainUpdateClient,
    ) -> RepositoryResult<DomainClient> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateClient::from(updates);

        let target = clients::table.filter(clients::id.eq(client_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbClient>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_client(&self, client_id: i32) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let target = clients::table.filter(clients::id.eq(client_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
