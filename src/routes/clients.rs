use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::clients::ClientForm;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, redirect, rejected_form_context, render_not_found, render_rejected_form,
    render_template,
};
use crate::services::{ServiceError, clients};

const DUPLICATE_EMAIL: &str = "A client with this email already exists.";

#[get("/clients")]
pub async fn show_clients(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match clients::load_clients(repo.get_ref()) {
        Ok(items) => {
            let mut context = base_context(&flash_messages, "clients");
            context.insert("clients", &items);
            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/clients/new")]
pub async fn new_client(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "clients");
    context.insert("action", "/clients/new");
    render_template(&tera, "clients/form.html", &context)
}

#[post("/clients/new")]
pub async fn add_client(
    repo: web::Data<DieselRepository>,
    form: web::Form<ClientForm>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = form.into_inner();

    match clients::create_client(repo.get_ref(), form.clone()) {
        Ok(client) => {
            FlashMessage::success(format!("Client “{}” added.", client.name)).send();
            redirect("/clients")
        }
        Err(ServiceError::Form(message)) => {
            let context = rejected_form_context("clients", "/clients/new", &form, &message);
            render_rejected_form(&tera, "clients/form.html", &context)
        }
        Err(ServiceError::Conflict) => {
            let context = rejected_form_context("clients", "/clients/new", &form, DUPLICATE_EMAIL);
            render_rejected_form(&tera, "clients/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to create client: {err}");
            FlashMessage::error("Could not create the client.").send();
            redirect("/clients")
        }
    }
}

#[get("/clients/{client_id}/edit")]
pub async fn edit_client_page(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let client_id = path.into_inner();
    let mut context = base_context(&flash_messages, "clients");

    match clients::load_client(repo.get_ref(), client_id) {
        Ok(client) => {
            context.insert("action", &format!("/clients/{client_id}/edit"));
            context.insert("client", &client);
            render_template(&tera, "clients/form.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load client {client_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/{client_id}/edit")]
pub async fn edit_client(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Form<ClientForm>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let client_id = path.into_inner();
    let action = format!("/clients/{client_id}/edit");
    let form = form.into_inner();

    match clients::modify_client(repo.get_ref(), client_id, form.clone()) {
        Ok(client) => {
            FlashMessage::success(format!("Client “{}” updated.", client.name)).send();
            redirect("/clients")
        }
        Err(ServiceError::Form(message)) => {
            let context = rejected_form_context("clients", &action, &form, &message);
            render_rejected_form(&tera, "clients/form.html", &context)
        }
        Err(ServiceError::Conflict) => {
            let context = rejected_form_context("clients", &action, &form, DUPLICATE_EMAIL);
            render_rejected_form(&tera, "clients/form.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
            redirect("/clients")
        }
        Err(err) => {
            log::error!("Failed to update client {client_id}: {err}");
            FlashMessage::error("Could not update the client.").send();
            redirect("/clients")
        }
    }
}

#[get("/clients/{client_id}/delete")]
pub async fn delete_client_page(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let client_id = path.into_inner();
    let mut context = base_context(&flash_messages, "clients");

    match clients::load_client(repo.get_ref(), client_id) {
        Ok(client) => {
            context.insert("client", &client);
            render_template(&tera, "clients/confirm_delete.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load client {client_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/{client_id}/delete")]
pub async fn delete_client(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let client_id = path.into_inner();

    match clients::remove_client(repo.get_ref(), client_id) {
        Ok(()) => {
            FlashMessage::success("Client and their sales deleted.").send();
            redirect("/clients")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found or already deleted.").send();
            redirect("/clients")
        }
        Err(err) => {
            log::error!("Failed to delete client {client_id}: {err}");
            FlashMessage::error("Could not delete the client.").send();
            redirect("/clients")
        }
    }
}
