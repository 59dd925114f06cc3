use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::product::Product;

/// Domain representation of a single sale: one client buying one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sale {
    /// Unique identifier of the sale.
    pub id: i32,
    /// Client that made the purchase.
    pub client_id: i32,
    /// Product that was sold.
    pub product_id: i32,
    /// Number of units sold, always at least one.
    pub quantity: i32,
    /// Timestamp captured when the sale was recorded. Never updated afterwards.
    pub created_at: NaiveDateTime,
}

/// Payload required to record a new sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub client_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

impl NewSale {
    /// Build a new sale payload stamped with the current time.
    pub fn new(client_id: i32, product_id: i32, quantity: i32) -> Self {
        Self {
            client_id,
            product_id,
            quantity,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Override the creation timestamp, e.g. when importing historical data.
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Editable sale fields. The creation timestamp is intentionally absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSale {
    pub client_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// A sale joined with its client and product, annotated with its total value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SaleDetails {
    pub sale: Sale,
    pub client: Client,
    pub product: Product,
    /// `quantity × product.price_cents` at read time.
    pub total_value_cents: i64,
}

impl SaleDetails {
    /// Join the parts and compute the total from the product's current price.
    pub fn new(sale: Sale, client: Client, product: Product) -> Self {
        let total_value_cents = total_value_cents(sale.quantity, product.price_cents);
        Self {
            sale,
            client,
            product,
            total_value_cents,
        }
    }
}

/// Total value of `quantity` units at `price_cents` each.
pub fn total_value_cents(quantity: i32, price_cents: i64) -> i64 {
    i64::from(quantity) * price_cents
}

/// Validated constraints for the sales list. Absent fields impose no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaleFilter {
    /// Only sales made by this client.
    pub client_id: Option<i32>,
    /// Only sales created on or after this date.
    pub date_from: Option<NaiveDate>,
    /// Only sales created on or before this date.
    pub date_to: Option<NaiveDate>,
}

impl SaleFilter {
    /// A filter that matches every sale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to sales made by `client_id`.
    pub fn client(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Restrict to sales created on or after `date`.
    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Restrict to sales created on or before `date`.
    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Whether the filter imposes no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.client_id.is_none() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Inclusive lower bound on `created_at`: midnight of `date_from`.
    pub fn created_from(&self) -> Option<NaiveDateTime> {
        self.date_from.map(|date| date.and_time(NaiveTime::MIN))
    }

    /// Exclusive upper bound on `created_at`: midnight following `date_to`.
    ///
    /// `None` when `date_to` is unset or is the last representable date.
    pub fn created_before(&self) -> Option<NaiveDateTime> {
        self.date_to
            .and_then(|date| date.succ_opt())
            .map(|date| date.and_time(NaiveTime::MIN))
    }

    /// In-memory equivalent of the store predicate.
    pub fn matches(&self, sale: &Sale) -> bool {
        if self.client_id.is_some_and(|client_id| sale.client_id != client_id) {
            return false;
        }
        let date = sale.created_at.date();
        if self.date_from.is_some_and(|from| date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid timestamp")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sale(client_id: i32, created_at: NaiveDateTime) -> Sale {
        Sale {
            id: 1,
            client_id,
            product_id: 1,
            quantity: 1,
            created_at,
        }
    }

    #[test]
    fn bounds_cover_whole_days() {
        let filter = SaleFilter::new()
            .date_from(date(2024, 1, 1))
            .date_to(date(2024, 1, 31));

        assert_eq!(filter.created_from(), Some(at(2024, 1, 1, 0, 0)));
        assert_eq!(filter.created_before(), Some(at(2024, 2, 1, 0, 0)));
    }

    #[test]
    fn last_representable_day_has_no_upper_bound() {
        let filter = SaleFilter::new().date_to(NaiveDate::MAX);

        assert_eq!(filter.created_before(), None);
    }

    #[test]
    fn matches_is_inclusive_on_both_ends() {
        let filter = SaleFilter::new()
            .date_from(date(2024, 1, 5))
            .date_to(date(2024, 1, 20));

        assert!(filter.matches(&sale(1, at(2024, 1, 5, 0, 0))));
        assert!(filter.matches(&sale(1, at(2024, 1, 20, 23, 59))));
        assert!(!filter.matches(&sale(1, at(2024, 1, 4, 23, 59))));
        assert!(!filter.matches(&sale(1, at(2024, 1, 21, 0, 0))));
    }

    #[test]
    fn matches_checks_client() {
        let filter = SaleFilter::new().client(2);

        assert!(filter.matches(&sale(2, at(2024, 3, 1, 12, 0))));
        assert!(!filter.matches(&sale(3, at(2024, 3, 1, 12, 0))));
        assert!(SaleFilter::new().is_empty());
        assert!(!filter.is_empty());
    }

    #[test]
    fn total_value_uses_wide_arithmetic() {
        assert_eq!(total_value_cents(3, 1250), 3750);
        assert_eq!(
            total_value_cents(i32::MAX, 99_999_999),
            i64::from(i32::MAX) * 99_999_999
        );
    }
}
