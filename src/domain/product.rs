use serde::{Deserialize, Serialize};

/// Largest unit price the catalog accepts: 999 999.99 (8 digits, 2 fractional).
pub const MAX_PRICE_CENTS: i64 = 99_999_999;

/// Domain representation of a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Unit price in cents.
    pub price_cents: i64,
    /// Units currently in stock.
    pub stock: i32,
}

impl Product {
    /// Unit price rendered with two fractional digits.
    pub fn price_display(&self) -> String {
        format_cents(self.price_cents)
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
}

impl NewProduct {
    /// Build a new product payload without a description.
    pub fn new(name: impl Into<String>, price_cents: i64, stock: i32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price_cents,
            stock,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Full replacement of the editable product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProduct {
    pub name: String,
    /// `None` clears the stored description.
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
}

impl From<NewProduct> for UpdateProduct {
    fn from(value: NewProduct) -> Self {
        Self {
            name: value.name,
            description: value.description,
            price_cents: value.price_cents,
            stock: value.stock,
        }
    }
}

/// Format an amount of cents as `units.cc`, e.g. `1250` as `12.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_cents_pads_fraction() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(1250), "12.50");
        assert_eq!(format_cents(MAX_PRICE_CENTS), "999999.99");
        assert_eq!(format_cents(-199), "-1.99");
    }
}
