use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::forms::sales::SaleForm;
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, redirect, rejected_form_context, render_not_found, render_rejected_form,
    render_template,
};
use crate::services::{ServiceError, sales};

#[get("/sales")]
pub async fn show_sales(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match sales::list_sales(repo.get_ref(), req.query_string()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "sales");
            context.insert("sales", &data.sales);
            context.insert("clients", &data.clients);
            context.insert("filter", &data.filter);
            context.insert("has_active_filters", &!data.filter.is_empty());
            render_template(&tera, "sales/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list sales: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn insert_form_options(repo: &DieselRepository, context: &mut Context) -> Result<(), ServiceError> {
    let options = sales::load_sale_form_options(repo)?;
    context.insert("clients", &options.clients);
    context.insert("products", &options.products);
    Ok(())
}

fn render_sale_form_error(
    repo: &DieselRepository,
    tera: &Tera,
    action: &str,
    form: &SaleForm,
    message: &str,
) -> HttpResponse {
    let mut context = rejected_form_context("sales", action, form, message);

    if let Err(err) = insert_form_options(repo, &mut context) {
        log::error!("Failed to load sale form options: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    render_rejected_form(tera, "sales/form.html", &context)
}

#[get("/sales/new")]
pub async fn new_sale(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "sales");

    if let Err(err) = insert_form_options(repo.get_ref(), &mut context) {
        log::error!("Failed to load sale form options: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    context.insert("action", "/sales/new");
    render_template(&tera, "sales/form.html", &context)
}

#[post("/sales/new")]
pub async fn add_sale(
    repo: web::Data<DieselRepository>,
    form: web::Form<SaleForm>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = form.into_inner();

    match sales::create_sale(repo.get_ref(), form.clone()) {
        Ok(sale) => {
            FlashMessage::success(format!("Sale #{} recorded.", sale.id)).send();
            redirect("/sales")
        }
        Err(ServiceError::Form(message)) => {
            render_sale_form_error(repo.get_ref(), &tera, "/sales/new", &form, &message)
        }
        Err(err) => {
            log::error!("Failed to create sale: {err}");
            FlashMessage::error("Could not record the sale.").send();
            redirect("/sales")
        }
    }
}

#[get("/sales/{sale_id}/edit")]
pub async fn edit_sale_page(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let sale_id = path.into_inner();
    let mut context = base_context(&flash_messages, "sales");

    let sale = match sales::load_sale(repo.get_ref(), sale_id) {
        Ok(sale) => sale,
        Err(ServiceError::NotFound) => return render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load sale {sale_id}: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(err) = insert_form_options(repo.get_ref(), &mut context) {
        log::error!("Failed to load sale form options: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    context.insert("action", &format!("/sales/{sale_id}/edit"));
    context.insert("sale", &sale);
    render_template(&tera, "sales/form.html", &context)
}

#[post("/sales/{sale_id}/edit")]
pub async fn edit_sale(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Form<SaleForm>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let sale_id = path.into_inner();
    let form = form.into_inner();

    match sales::modify_sale(repo.get_ref(), sale_id, form.clone()) {
        Ok(sale) => {
            FlashMessage::success(format!("Sale #{} updated.", sale.id)).send();
            redirect("/sales")
        }
        Err(ServiceError::Form(message)) => {
            let action = format!("/sales/{sale_id}/edit");
            render_sale_form_error(repo.get_ref(), &tera, &action, &form, &message)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Sale not found.").send();
            redirect("/sales")
        }
        Err(err) => {
            log::error!("Failed to update sale {sale_id}: {err}");
            FlashMessage::error("Could not update the sale.").send();
            redirect("/sales")
        }
    }
}

#[get("/sales/{sale_id}/delete")]
pub async fn delete_sale_page(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let sale_id = path.into_inner();
    let mut context = base_context(&flash_messages, "sales");

    match sales::load_sale(repo.get_ref(), sale_id) {
        Ok(sale) => {
            context.insert("sale", &sale);
            render_template(&tera, "sales/confirm_delete.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load sale {sale_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/sales/{sale_id}/delete")]
pub async fn delete_sale(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let sale_id = path.into_inner();

    match sales::remove_sale(repo.get_ref(), sale_id) {
        Ok(()) => {
            FlashMessage::success("Sale deleted.").send();
            redirect("/sales")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Sale not found or already deleted.").send();
            redirect("/sales")
        }
        Err(err) => {
            log::error!("Failed to delete sale {sale_id}: {err}");
            FlashMessage::error("Could not delete the sale.").send();
            redirect("/sales")
        }
    }
}
