use mockall::mock;

use super::{
    ClientReader, ClientWriter, ProductReader, ProductWriter, RepositoryResult, SaleReader,
    SaleWriter,
};
use crate::domain::{
    client::{Client, NewClient, UpdateClient},
    product::{NewProduct, Product, UpdateProduct},
    sale::{NewSale, Sale, SaleDetails, SaleFilter, UpdateSale},
};

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn create_products(&self, new_products: &[NewProduct]) -> RepositoryResult<usize>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ClientsRepo {}

    impl ClientReader for ClientsRepo {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for ClientsRepo {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, client_id: i32, updates: &UpdateClient) -> RepositoryResult<Client>;
        fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    // Sales screens read sales alongside the catalog and the client list.
    pub SalesRepo {}

    impl SaleReader for SalesRepo {
        fn get_sale_by_id(&self, id: i32) -> RepositoryResult<Option<SaleDetails>>;
        fn list_sales(&self, filter: SaleFilter) -> RepositoryResult<Vec<SaleDetails>>;
    }

    impl SaleWriter for SalesRepo {
        fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
        fn update_sale(&self, sale_id: i32, updates: &UpdateSale) -> RepositoryResult<Sale>;
        fn delete_sale(&self, sale_id: i32) -> RepositoryResult<()>;
    }

    impl ClientReader for SalesRepo {
        fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
        fn get_client_by_email(&self, email: &str) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ProductReader for SalesRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }
}
