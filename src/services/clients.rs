use crate::domain::client::Client;
use crate::forms::clients::ClientForm;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads every client for the client list.
pub fn load_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().map_err(ServiceError::from)
}

/// Loads a single client, failing with `NotFound` when it does not exist.
pub fn load_client<R>(repo: &R, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    repo.get_client_by_id(client_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new client. A taken email yields `Conflict`.
pub fn create_client<R>(repo: &R, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let new_client = form
        .into_new_client()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_email_available(repo, &new_client.email, None)?;

    repo.create_client(&new_client).map_err(ServiceError::from)
}

/// Replaces the editable fields of an existing client.
pub fn modify_client<R>(repo: &R, client_id: i32, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let updates = form
        .into_update_client()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_email_available(repo, &updates.email, Some(client_id))?;

    repo.update_client(client_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a client and, through the store's cascade, all of their sales.
pub fn remove_client<R>(repo: &R, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client(client_id).map_err(ServiceError::from)
}

// The unique index still has the final say under concurrent writes.
fn ensure_email_available<R>(repo: &R, email: &str, owner_id: Option<i32>) -> ServiceResult<()>
where
    R: ClientReader + ?Sized,
{
    match repo.get_client_by_email(email).map_err(ServiceError::from)? {
        Some(existing) if Some(existing.id) != owner_id => Err(ServiceError::Conflict),
        _ => Ok(()),
    }
}
