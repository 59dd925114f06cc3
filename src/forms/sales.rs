use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::sale::{NewSale, SaleFilter, UpdateSale};
use crate::forms::{empty_string_as_none, parse_iso_date};

/// Result type returned by the sale form helpers.
pub type SaleFormResult<T> = Result<T, SaleFormError>;

/// Errors that can occur while processing sale forms.
#[derive(Debug, Error)]
pub enum SaleFormError {
    /// A numeric field is blank, not an integer or below one.
    #[error("{field} must be a whole number of at least 1")]
    InvalidNumber { field: &'static str, value: String },
}

/// Form payload emitted by the create and edit sale screens.
///
/// Fields arrive as typed so that a malformed number is reported back on the
/// form instead of failing request extraction. The creation timestamp is
/// assigned by the server and cannot be edited.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SaleForm {
    /// Client making the purchase.
    pub client_id: String,
    /// Product being sold.
    pub product_id: String,
    /// Units sold.
    pub quantity: String,
}

impl SaleForm {
    /// Validates the payload into a domain `NewSale` stamped with the current time.
    pub fn into_new_sale(self) -> SaleFormResult<NewSale> {
        let update = self.into_update_sale()?;
        Ok(NewSale::new(
            update.client_id,
            update.product_id,
            update.quantity,
        ))
    }

    /// Validates the payload into a domain `UpdateSale`.
    pub fn into_update_sale(self) -> SaleFormResult<UpdateSale> {
        Ok(UpdateSale {
            client_id: parse_positive("client", &self.client_id)?,
            product_id: parse_positive("product", &self.product_id)?,
            quantity: parse_positive("quantity", &self.quantity)?,
        })
    }
}

fn parse_positive(field: &'static str, raw: &str) -> SaleFormResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|value| *value >= 1)
        .ok_or_else(|| SaleFormError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        })
}

/// Raw filter fields of the sales list, exactly as they arrive in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilterForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_from: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date_to: Option<String>,
}

impl SaleFilterForm {
    /// Convert the raw fields into a [`SaleFilter`].
    ///
    /// Returns `None` if any supplied field is malformed; blank fields count as absent.
    pub fn into_filter(self) -> Option<SaleFilter> {
        let mut filter = SaleFilter::new();

        if let Some(client) = self.client {
            let client_id = client.trim().parse::<i32>().ok().filter(|id| *id > 0)?;
            filter = filter.client(client_id);
        }

        if let Some(date_from) = self.date_from {
            filter = filter.date_from(parse_iso_date(&date_from)?);
        }

        if let Some(date_to) = self.date_to {
            filter = filter.date_to(parse_iso_date(&date_to)?);
        }

        Some(filter)
    }
}

/// Parse the raw query string of the sales list into a filter.
///
/// Any shape error (unparseable date, non-numeric client, malformed encoding)
/// yields `None`; callers treat that as "no filter".
pub fn parse_filter(raw: &str) -> Option<SaleFilter> {
    match serde_html_form::from_str::<SaleFilterForm>(raw) {
        Ok(form) => form.into_filter(),
        Err(err) => {
            log::debug!("Malformed sales filter query `{raw}`: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parse_filter_reads_all_fields() {
        let filter = parse_filter("client=3&date_from=2024-01-01&date_to=2024-01-31")
            .expect("expected a valid filter");

        assert_eq!(filter.client_id, Some(3));
        assert_eq!(filter.date_from, Some(date(2024, 1, 1)));
        assert_eq!(filter.date_to, Some(date(2024, 1, 31)));
    }

    #[test]
    fn parse_filter_treats_blank_fields_as_absent() {
        let filter = parse_filter("client=&date_from=&date_to=2024-02-10")
            .expect("expected a valid filter");

        assert_eq!(filter, SaleFilter::new().date_to(date(2024, 2, 10)));
        assert_eq!(parse_filter(""), Some(SaleFilter::new()));
    }

    #[test]
    fn parse_filter_ignores_unknown_keys() {
        let filter = parse_filter("page=2&client=5").expect("expected a valid filter");

        assert_eq!(filter, SaleFilter::new().client(5));
    }

    #[test]
    fn parse_filter_rejects_unparseable_date() {
        assert_eq!(parse_filter("date_from=yesterday"), None);
        assert_eq!(parse_filter("client=1&date_to=2024-13-01"), None);
    }

    #[test]
    fn parse_filter_rejects_years_beyond_four_digits() {
        assert_eq!(parse_filter("date_to=%2B10000-01-01"), None);
        assert_eq!(parse_filter("date_from=%2B10000-01-01&client=2"), None);
        assert_eq!(parse_filter("date_from=-0005-01-01"), None);
    }

    #[test]
    fn parse_filter_rejects_malformed_client() {
        assert_eq!(parse_filter("client=abc"), None);
        assert_eq!(parse_filter("client=-4"), None);
        assert_eq!(parse_filter("client=0"), None);
    }

    fn sale_form(client_id: &str, product_id: &str, quantity: &str) -> SaleForm {
        SaleForm {
            client_id: client_id.to_string(),
            product_id: product_id.to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn sale_form_requires_positive_quantity() {
        assert!(matches!(
            sale_form("1", "2", "0").into_new_sale(),
            Err(SaleFormError::InvalidNumber { field: "quantity", .. })
        ));
    }

    #[test]
    fn sale_form_reports_blank_and_non_numeric_fields() {
        assert!(matches!(
            sale_form("1", "2", "two").into_new_sale(),
            Err(SaleFormError::InvalidNumber { field: "quantity", value }) if value == "two"
        ));
        assert!(matches!(
            sale_form("", "2", "1").into_update_sale(),
            Err(SaleFormError::InvalidNumber { field: "client", .. })
        ));
    }

    #[test]
    fn sale_form_reads_missing_fields_as_blank() {
        let form: SaleForm =
            serde_html_form::from_str("client_id=1&quantity=3").expect("expected to deserialize");

        assert_eq!(form.product_id, "");
        assert!(matches!(
            form.into_new_sale(),
            Err(SaleFormError::InvalidNumber { field: "product", .. })
        ));
    }

    #[test]
    fn sale_form_builds_update_without_timestamp() {
        let update = sale_form(" 4 ", "9", "3")
            .into_update_sale()
            .expect("expected success");

        assert_eq!(
            update,
            UpdateSale {
                client_id: 4,
                product_id: 9,
                quantity: 3,
            }
        );
    }
}
