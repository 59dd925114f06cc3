use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use pushkind_sales::config::ServerConfig;
use pushkind_sales::db::{establish_connection_pool, run_migrations};
use pushkind_sales::repository::DieselRepository;
use pushkind_sales::routes::clients::{
    add_client, delete_client, delete_client_page, edit_client, edit_client_page, new_client,
    show_clients,
};
use pushkind_sales::routes::products::{
    add_product, delete_product, delete_product_page, edit_product, edit_product_page,
    new_product, show_products, upload_products,
};
use pushkind_sales::routes::sales::{
    add_sale, delete_sale, delete_sale_page, edit_sale, edit_sale_page, new_sale, show_sales,
};
use pushkind_sales::routes::show_index;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match config.secret_key.as_deref().map(str::as_bytes) {
        Some(bytes) => Key::try_from(bytes).unwrap_or_else(|e| {
            log::warn!("Ignoring SECRET_KEY ({e}), generating a random key");
            Key::generate()
        }),
        None => {
            log::warn!("SECRET_KEY is not set, flash messages will not survive a restart");
            Key::generate()
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new(&config.templates_glob()) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(show_products)
            .service(new_product)
            .service(add_product)
            .service(upload_products)
            .service(edit_product_page)
            .service(edit_product)
            .service(delete_product_page)
            .service(delete_product)
            .service(show_clients)
            .service(new_client)
            .service(add_client)
            .service(edit_client_page)
            .service(edit_client)
            .service(delete_client_page)
            .service(delete_client)
            .service(show_sales)
            .service(new_sale)
            .service(add_sale)
            .service(edit_sale_page)
            .service(edit_sale)
            .service(delete_sale_page)
            .service(delete_sale)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
