use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::{StringRecord, Trim};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{MAX_PRICE_CENTS, NewProduct, UpdateProduct};
use crate::forms::{empty_string_as_none, sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 100;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Digits allowed before the decimal separator (8 total, 2 fractional).
const PRICE_INTEGER_DIGITS: usize = 6;
const PRICE_FRACTION_DIGITS: usize = 2;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price is not a non-negative amount with at most 6 integer and 2 fractional digits.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The stock count is blank, not an integer or negative.
    #[error("stock must be a whole number of at least 0")]
    InvalidStock { value: String },
    /// The uploaded CSV is missing required columns.
    #[error("upload is missing the required `name` or `price` headers")]
    MissingRequiredHeaders,
    /// A CSV row did not include a product name.
    #[error("row {row} is missing a product name")]
    UploadMissingName { row: usize },
    /// A CSV row contained an invalid price.
    #[error("row {row} has invalid price `{value}`")]
    UploadInvalidPrice { row: usize, value: String },
    /// A CSV row contained an invalid stock count.
    #[error("row {row} has invalid stock `{value}`")]
    UploadInvalidStock { row: usize, value: String },
    /// The uploaded CSV did not contain any products.
    #[error("upload contains no products")]
    EmptyUpload,
    /// The uploaded file could not be read.
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Form payload emitted by the create and edit product screens.
///
/// Numbers are kept as typed and parsed during conversion, so a rejected
/// submission can be shown back to the user unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Unit price as typed, e.g. `12.50`.
    pub price: String,
    /// Units in stock.
    pub stock: String,
}

impl ProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price_cents = parse_price(&self.price).ok_or_else(|| ProductFormError::InvalidPrice {
            value: self.price.trim().to_string(),
        })?;

        let stock = parse_stock(&self.stock).ok_or_else(|| ProductFormError::InvalidStock {
            value: self.stock.trim().to_string(),
        })?;

        let mut new_product = NewProduct::new(sanitized_name, price_cents, stock);

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }

        Ok(new_product)
    }

    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    ///
    /// A blank description clears the stored one.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.into_new_product().map(UpdateProduct::from)
    }
}

/// Parse a user-entered price into cents.
///
/// Accepts `.` or `,` as decimal separator and up to two fractional digits.
pub fn parse_price(input: &str) -> Option<i64> {
    let normalized = input.trim().replace(',', ".");
    let (integer, fraction) = match normalized.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (normalized.as_str(), ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }

    let significant = integer.trim_start_matches('0');
    if significant.len() > PRICE_INTEGER_DIGITS || fraction.len() > PRICE_FRACTION_DIGITS {
        return None;
    }

    let units: i64 = if significant.is_empty() {
        0
    } else {
        significant.parse().ok()?
    };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    let total = units * 100 + cents;
    (total <= MAX_PRICE_CENTS).then_some(total)
}

fn parse_stock(input: &str) -> Option<i32> {
    input.trim().parse::<i32>().ok().filter(|stock| *stock >= 0)
}

#[derive(MultipartForm)]
/// Multipart form for uploading a CSV file with new products.
pub struct UploadProductsForm {
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file with `name`, `price`, and optional `description` and `stock` columns.
    pub csv: TempFile,
}

impl UploadProductsForm {
    /// Parse the uploaded CSV file into a list of [`NewProduct`] records.
    pub fn into_new_products(&mut self) -> ProductFormResult<Vec<NewProduct>> {
        self.csv.file.rewind()?;
        parse_products(self.csv.file.by_ref())
    }
}

struct ProductHeaderIndexes {
    name: usize,
    price: usize,
    description: Option<usize>,
    stock: Option<usize>,
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(expected))
}

fn parse_products<R: Read>(reader: R) -> ProductFormResult<Vec<NewProduct>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let indexes = match (locate_header(&headers, "name"), locate_header(&headers, "price")) {
        (Some(name), Some(price)) => ProductHeaderIndexes {
            name,
            price,
            description: locate_header(&headers, "description"),
            stock: locate_header(&headers, "stock"),
        },
        _ => return Err(ProductFormError::MissingRequiredHeaders),
    };

    let mut products = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row_number = index + 2; // account for header row
        let record = row?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let name = sanitize_inline_text(record.get(indexes.name).unwrap_or(""));
        if name.is_empty() {
            return Err(ProductFormError::UploadMissingName { row: row_number });
        }

        let price_raw = record.get(indexes.price).unwrap_or("");
        let price_cents =
            parse_price(price_raw).ok_or_else(|| ProductFormError::UploadInvalidPrice {
                row: row_number,
                value: price_raw.to_string(),
            })?;

        let stock_raw = indexes
            .stock
            .and_then(|idx| record.get(idx))
            .unwrap_or("");
        let stock = if stock_raw.is_empty() {
            0
        } else {
            parse_stock(stock_raw).ok_or_else(|| ProductFormError::UploadInvalidStock {
                row: row_number,
                value: stock_raw.to_string(),
            })?
        };

        let mut product = NewProduct::new(name, price_cents, stock);

        if let Some(description) = indexes
            .description
            .and_then(|idx| record.get(idx))
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            product = product.with_description(description);
        }

        products.push(product);
    }

    if products.is_empty() {
        return Err(ProductFormError::EmptyUpload);
    }

    Ok(products)
}
