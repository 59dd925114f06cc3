//! HTTP handlers plus the page helpers they share: flash alerts, template
//! rendering and redirects, in place of the helpers of the shared service crate.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, Responder, get};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

pub mod clients;
pub mod products;
pub mod sales;

/// Flash message prepared for the base template.
#[derive(Debug, Serialize)]
struct Alert<'a> {
    level: &'static str,
    message: &'a str,
}

fn level_class(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

/// Context shared by every page: pending flash messages and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts: Vec<Alert<'_>> = flash_messages
        .iter()
        .map(|message| Alert {
            level: level_class(message.level()),
            message: message.content(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Context for showing a rejected form again: the submitted values under
/// `form` and the reason as an error alert.
pub fn rejected_form_context<T: Serialize>(
    current_page: &str,
    action: &str,
    form: &T,
    error: &str,
) -> Context {
    let alerts = [Alert {
        level: level_class(Level::Error),
        message: error,
    }];

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("action", action);
    context.insert("form", form);
    context
}

/// Render `template` into an HTML response, logging and returning 500 on failure.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::OK)
}

/// Render a form that was submitted with invalid data, answering `422`.
pub fn render_rejected_form(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::UNPROCESSABLE_ENTITY)
}

fn render_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template `{template}`: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Render the shared "not found" page with a 404 status.
pub fn render_not_found(tera: &Tera, context: &Context) -> HttpResponse {
    match tera.render("errors/404.html", context) {
        Ok(body) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render not found page: {err}");
            HttpResponse::NotFound().finish()
        }
    }
}

/// `303 See Other` to `location`, used after every accepted POST.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect("/sales")
}
