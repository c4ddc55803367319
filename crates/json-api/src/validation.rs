//! Request shape validation shared by the category and product payloads.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::http::StatusError;

pub(crate) fn require_name(name: &str, max_len: usize) -> Result<(), StatusError> {
    if name.trim().is_empty() {
        return Err(StatusError::bad_request().brief("name is required"));
    }

    if name.chars().count() > max_len {
        return Err(StatusError::bad_request()
            .brief(format!("name cannot exceed {max_len} characters")));
    }

    Ok(())
}

pub(crate) fn limit_description(
    description: Option<&str>,
    max_len: usize,
) -> Result<(), StatusError> {
    if let Some(description) = description
        && description.chars().count() > max_len
    {
        return Err(StatusError::bad_request()
            .brief(format!("description cannot exceed {max_len} characters")));
    }

    Ok(())
}

/// Parse a price into a positive decimal. Prices travel as decimal
/// strings, never as binary floats.
pub(crate) fn require_positive_price(price: &str) -> Result<Decimal, StatusError> {
    let parsed = Decimal::from_str(price.trim())
        .map_err(|_ignored| StatusError::bad_request().brief("price is not a valid decimal"))?;

    if parsed <= Decimal::ZERO {
        return Err(StatusError::bad_request().brief("price must be greater than 0"));
    }

    Ok(parsed)
}

pub(crate) fn require_non_negative_stock(stock: i64) -> Result<i64, StatusError> {
    if stock < 0 {
        return Err(StatusError::bad_request().brief("stock cannot be negative"));
    }

    Ok(stock)
}
