//! Range and precision checks for the fixed-point columns.
//!
//! `price` is `NUMERIC(5,2)` and `ratings` is `NUMERIC(3,1)`; values that
//! would not fit are rejected here instead of surfacing as a database error.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Upper bound (exclusive) for a recipe price.
const MAX_PRICE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Upper bound (inclusive) for a movie rating.
const MAX_RATING: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// A non-negative price below 1000 with at most two decimal places.
pub fn check_price(price: Decimal) -> Result<(), CoreError> {
    check_scale("price", price, 2)?;
    if price < Decimal::ZERO {
        return Err(CoreError::Validation("price: must not be negative".into()));
    }
    if price >= MAX_PRICE {
        return Err(CoreError::Validation(
            "price: ensure that there are no more than 3 digits before the decimal point".into(),
        ));
    }
    Ok(())
}

/// A rating between 0 and 10 inclusive with at most one decimal place.
pub fn check_rating(rating: Decimal) -> Result<(), CoreError> {
    check_scale("ratings", rating, 1)?;
    if rating < Decimal::ZERO || rating > MAX_RATING {
        return Err(CoreError::Validation("ratings: must be between 0 and 10".into()));
    }
    Ok(())
}

fn check_scale(field: &str, value: Decimal, max_scale: u32) -> Result<(), CoreError> {
    if value.normalize().scale() > max_scale {
        return Err(CoreError::Validation(format!(
            "{field}: ensure that there are no more than {max_scale} decimal places"
        )));
    }
    Ok(())
}
