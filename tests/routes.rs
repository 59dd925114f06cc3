use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use pushkind_sales::domain::client::NewClient;
use pushkind_sales::domain::product::NewProduct;
use pushkind_sales::repository::{ClientWriter, DieselRepository, ProductWriter};
use pushkind_sales::routes::products::add_product;
use pushkind_sales::routes::sales::add_sale;

mod common;

use common::date;

fn templates() -> Tera {
    Tera::new("templates/**/*").expect("templates parse")
}

fn flash_framework() -> FlashMessagesFramework {
    let store = CookieMessageStore::builder(Key::generate()).build();
    FlashMessagesFramework::builder(store).build()
}

#[actix_web::test]
async fn blank_stock_shows_the_form_again() {
    let test_db = common::TestDb::new("routes_blank_stock.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .app_data(web::Data::new(templates()))
            .app_data(web::Data::new(repo))
            .service(add_product),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/products/new")
        .set_form([("name", "Green Tea"), ("price", "12.50"), ("stock", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("stock must be a whole number"));
    assert!(body.contains("value=\"Green Tea\""));
    assert!(body.contains("value=\"12.50\""));
}

#[actix_web::test]
async fn valid_product_redirects_to_list() {
    let test_db = common::TestDb::new("routes_valid_product.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .app_data(web::Data::new(templates()))
            .app_data(web::Data::new(repo))
            .service(add_product),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/products/new")
        .set_form([("name", "Green Tea"), ("price", "12.50"), ("stock", "4")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/products")
    );
}

#[actix_web::test]
async fn non_numeric_quantity_keeps_selected_options() {
    let test_db = common::TestDb::new("routes_non_numeric_quantity.db");
    let repo = DieselRepository::new(test_db.pool());
    let ana = repo
        .create_client(&NewClient::new("Ana", "ana@example.com", date(1990, 3, 14)))
        .expect("create client");
    let tea = repo
        .create_product(&NewProduct::new("Tea", 1250, 10))
        .expect("create product");
    let app = test::init_service(
        App::new()
            .wrap(flash_framework())
            .app_data(web::Data::new(templates()))
            .app_data(web::Data::new(repo))
            .service(add_sale),
    )
    .await;

    let client_id = ana.id.to_string();
    let product_id = tea.id.to_string();
    let req = test::TestRequest::post()
        .uri("/sales/new")
        .set_form([
            ("client_id", client_id.as_str()),
            ("product_id", product_id.as_str()),
            ("quantity", "two"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("quantity must be a whole number"));
    assert!(body.contains(&format!("value=\"{}\" selected", ana.id)));
    assert!(body.contains("value=\"two\""));
}
