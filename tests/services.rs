use pushkind_sales::domain::client::NewClient;
use pushkind_sales::domain::product::NewProduct;
use pushkind_sales::domain::sale::NewSale;
use pushkind_sales::forms::clients::ClientForm;
use pushkind_sales::forms::products::ProductForm;
use pushkind_sales::forms::sales::SaleForm;
use pushkind_sales::repository::{ClientWriter, DieselRepository, ProductWriter, SaleWriter};
use pushkind_sales::services::{ServiceError, clients, products, sales};

mod common;

use common::{at, date};

fn seed_sales(repo: &DieselRepository) -> (i32, i32) {
    let ana = repo
        .create_client(&NewClient::new("Ana", "ana@example.com", date(1990, 3, 14)))
        .expect("create client");
    let bruno = repo
        .create_client(&NewClient::new("Bruno", "bruno@example.com", date(1985, 7, 2)))
        .expect("create client");
    let tea = repo
        .create_product(&NewProduct::new("Tea", 1250, 10))
        .expect("create product");

    for (client_id, created_at) in [
        (ana.id, at(2024, 1, 5, 9, 0)),
        (ana.id, at(2024, 2, 10, 9, 0)),
        (bruno.id, at(2024, 1, 20, 9, 0)),
    ] {
        repo.create_sale(&NewSale::new(client_id, tea.id, 2).with_created_at(created_at))
            .expect("create sale");
    }

    (ana.id, bruno.id)
}

fn sale_ids(page: &sales::SalesPageData) -> Vec<i32> {
    let mut ids: Vec<i32> = page.sales.iter().map(|sale| sale.id).collect();
    ids.sort();
    ids
}

#[test]
fn list_sales_applies_valid_filter() {
    let test_db = common::TestDb::new("service_list_sales_applies_valid_filter.db");
    let repo = DieselRepository::new(test_db.pool());
    let (ana, _) = seed_sales(&repo);

    let page = sales::list_sales(&repo, "date_from=2024-01-01&date_to=2024-01-31")
        .expect("list sales");
    assert_eq!(page.sales.len(), 2);
    assert!(page.sales.iter().all(|sale| sale.total_value_cents == 2500));
    assert_eq!(page.clients.len(), 2);

    let page = sales::list_sales(&repo, &format!("client={ana}")).expect("list sales");
    assert_eq!(page.sales.len(), 2);
    assert!(page.sales.iter().all(|sale| sale.client_name == "Ana"));
    assert_eq!(page.filter.client_id, Some(ana));
}

#[test]
fn list_sales_with_invalid_date_matches_unfiltered_list() {
    let test_db = common::TestDb::new("service_list_sales_invalid_date.db");
    let repo = DieselRepository::new(test_db.pool());
    let (ana, _) = seed_sales(&repo);

    let unfiltered = sales::list_sales(&repo, "").expect("list sales");
    let invalid = sales::list_sales(&repo, &format!("client={ana}&date_from=2024-13-45"))
        .expect("list sales");

    assert_eq!(unfiltered.sales.len(), 3);
    assert_eq!(sale_ids(&invalid), sale_ids(&unfiltered));
    assert!(invalid.filter.is_empty());
}

#[test]
fn list_sales_with_five_digit_year_matches_unfiltered_list() {
    let test_db = common::TestDb::new("service_list_sales_five_digit_year.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_sales(&repo);

    let unfiltered = sales::list_sales(&repo, "").expect("list sales");
    for query in ["date_to=%2B10000-01-01", "date_from=10000-01-01"] {
        let page = sales::list_sales(&repo, query).expect("list sales");
        assert_eq!(sale_ids(&page), sale_ids(&unfiltered), "query {query}");
        assert!(page.filter.is_empty());
    }
}

#[test]
fn list_sales_with_unknown_client_matches_unfiltered_list() {
    let test_db = common::TestDb::new("service_list_sales_unknown_client.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_sales(&repo);

    let unfiltered = sales::list_sales(&repo, "").expect("list sales");
    let unknown = sales::list_sales(&repo, "client=999&date_from=2024-01-01&date_to=2024-01-31")
        .expect("list sales");

    assert_eq!(sale_ids(&unknown), sale_ids(&unfiltered));
}

#[test]
fn create_sale_rejects_unknown_product() {
    let test_db = common::TestDb::new("service_create_sale_rejects_unknown_product.db");
    let repo = DieselRepository::new(test_db.pool());
    let (ana, _) = seed_sales(&repo);

    let result = sales::create_sale(
        &repo,
        SaleForm {
            client_id: ana.to_string(),
            product_id: "999".to_string(),
            quantity: "1".to_string(),
        },
    );

    assert!(matches!(result, Err(ServiceError::Form(_))));
}

#[test]
fn create_client_reports_duplicate_email() {
    let test_db = common::TestDb::new("service_create_client_reports_duplicate_email.db");
    let repo = DieselRepository::new(test_db.pool());

    let form = || ClientForm {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        birth_date: "1990-03-14".to_string(),
    };

    assert!(clients::create_client(&repo, form()).is_ok());
    assert!(matches!(
        clients::create_client(&repo, form()),
        Err(ServiceError::Conflict)
    ));
}

#[test]
fn modify_product_changes_listed_totals() {
    let test_db = common::TestDb::new("service_modify_product_changes_listed_totals.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_sales(&repo);

    let tea = products::load_products(&repo)
        .expect("load products")
        .pop()
        .expect("product exists");

    products::modify_product(
        &repo,
        tea.id,
        ProductForm {
            name: "Tea".to_string(),
            description: None,
            price: "3.00".to_string(),
            stock: "10".to_string(),
        },
    )
    .expect("modify product");

    let page = sales::list_sales(&repo, "").expect("list sales");
    assert!(page.sales.iter().all(|sale| sale.total_value_cents == 600));
    assert!(page.sales.iter().all(|sale| sale.total_value_formatted == "6.00"));
}

#[test]
fn remove_client_cascades_to_sales() {
    let test_db = common::TestDb::new("service_remove_client_cascades_to_sales.db");
    let repo = DieselRepository::new(test_db.pool());
    let (ana, _) = seed_sales(&repo);

    clients::remove_client(&repo, ana).expect("remove client");

    let page = sales::list_sales(&repo, "").expect("list sales");
    assert_eq!(page.sales.len(), 1);
    assert_eq!(page.sales[0].client_name, "Bruno");
    assert!(matches!(
        clients::remove_client(&repo, ana),
        Err(ServiceError::NotFound)
    ));
}
