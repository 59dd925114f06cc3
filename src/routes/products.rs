use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::products::{ProductForm, UploadProductsForm};
use crate::repository::DieselRepository;
use crate::routes::{
    base_context, redirect, rejected_form_context, render_not_found, render_rejected_form,
    render_template,
};
use crate::services::{ServiceError, products};

#[get("/products")]
pub async fn show_products(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_products(repo.get_ref()) {
        Ok(items) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("products", &items);
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/new")]
pub async fn new_product(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "products");
    context.insert("action", "/products/new");
    render_template(&tera, "products/form.html", &context)
}

#[post("/products/new")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Form<ProductForm>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = form.into_inner();

    match products::create_product(repo.get_ref(), form.clone()) {
        Ok(product) => {
            FlashMessage::success(format!("Product “{}” added.", product.name)).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            let context = rejected_form_context("products", "/products/new", &form, &message);
            render_rejected_form(&tera, "products/form.html", &context)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("Could not create the product.").send();
            redirect("/products")
        }
    }
}

#[post("/products/upload")]
pub async fn upload_products(
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadProductsForm>,
) -> impl Responder {
    match products::import_products(repo.get_ref(), &mut form) {
        Ok(created) => {
            FlashMessage::success(format!("Imported {created} product(s).")).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to import products: {err}");
            FlashMessage::error("Could not import products.").send();
            redirect("/products")
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn edit_product_page(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    let mut context = base_context(&flash_messages, "products");

    match products::load_product(repo.get_ref(), product_id) {
        Ok(product) => {
            context.insert("action", &format!("/products/{product_id}/edit"));
            context.insert("product", &product);
            render_template(&tera, "products/form.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Form<ProductForm>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    let form = form.into_inner();

    match products::modify_product(repo.get_ref(), product_id, form.clone()) {
        Ok(product) => {
            FlashMessage::success(format!("Product “{}” updated.", product.name)).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            let action = format!("/products/{product_id}/edit");
            let context = rejected_form_context("products", &action, &form, &message);
            render_rejected_form(&tera, "products/form.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            FlashMessage::error("Could not update the product.").send();
            redirect("/products")
        }
    }
}

#[get("/products/{product_id}/delete")]
pub async fn delete_product_page(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    let mut context = base_context(&flash_messages, "products");

    match products::load_product(repo.get_ref(), product_id) {
        Ok(product) => {
            context.insert("product", &product);
            render_template(&tera, "products/confirm_delete.html", &context)
        }
        Err(ServiceError::NotFound) => render_not_found(&tera, &context),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::remove_product(repo.get_ref(), product_id) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
            redirect("/products")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found or already deleted.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("Could not delete the product.").send();
            redirect("/products")
        }
    }
}
