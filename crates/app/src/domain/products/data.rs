//! Products Data
//!
//! Validated values accepted by the products repository. Construction is the
//! only place field rules are checked, so anything holding a [`NewProduct`] or
//! [`ProductUpdate`] is known to satisfy them.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;

use crate::domain::products::errors::{FieldError, ValidationError};

/// Longest accepted product name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Number of decimal places a price is stored with.
pub const PRICE_SCALE: u32 = 2;

const MAX_PRICE_DISPLAY: &str = "99999.99";

fn max_price() -> Decimal {
    Decimal::new(9_999_999, PRICE_SCALE)
}

/// Trimmed, non-empty product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    /// Trim surrounding whitespace and check the name is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when the trimmed name is empty or too long.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(FieldError::Invalid("name"));
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(FieldError::TooLong {
                field: "name",
                max: MAX_NAME_LENGTH,
            });
        }

        Ok(Self(name.to_owned()))
    }

    /// Borrow the trimmed name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the trimmed name.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Strictly positive price with at most two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Parse a decimal string such as `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when the text is not a decimal or the value is
    /// out of range.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let value = Decimal::from_str(raw.trim())
            .map_err(|_ignored| FieldError::NotDecimal("price"))?;

        Self::new(value)
    }

    /// Check a decimal value and rescale it to two places.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when the value is not positive, has too many
    /// decimal places or does not fit the stored precision.
    pub fn new(value: Decimal) -> Result<Self, FieldError> {
        if value <= Decimal::ZERO {
            return Err(FieldError::Invalid("price"));
        }

        let mut value = value.normalize();

        if value.scale() > PRICE_SCALE {
            return Err(FieldError::TooManyDecimalPlaces {
                field: "price",
                places: PRICE_SCALE,
            });
        }

        if value > max_price() {
            return Err(FieldError::TooLarge {
                field: "price",
                max: MAX_PRICE_DISPLAY,
            });
        }

        value.rescale(PRICE_SCALE);

        Ok(Self(value))
    }

    /// Take the value, scaled to two places.
    #[must_use]
    pub const fn into_decimal(self) -> Decimal {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name.
    pub name: ProductName,
    /// Unit price.
    pub price: Price,
}

impl NewProduct {
    /// Validate a complete product payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every invalid field.
    pub fn new(name: &str, price: &str) -> Result<Self, ValidationError> {
        match (ProductName::parse(name), Price::parse(price)) {
            (Ok(name), Ok(price)) => Ok(Self { name, price }),
            (name, price) => Err(name.err().into_iter().chain(price.err()).collect()),
        }
    }
}

/// Product Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// Replacement name.
    pub name: Option<ProductName>,
    /// Replacement price.
    pub price: Option<Price>,
}

impl ProductUpdate {
    /// Validate the fields present in a partial payload.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every invalid field.
    pub fn new(name: Option<&str>, price: Option<&str>) -> Result<Self, ValidationError> {
        let name = name.map(ProductName::parse).transpose();
        let price = price.map(Price::parse).transpose();

        match (name, price) {
            (Ok(name), Ok(price)) => Ok(Self { name, price }),
            (name, price) => Err(name.err().into_iter().chain(price.err()).collect()),
        }
    }

    /// Whether the update changes no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

impl From<NewProduct> for ProductUpdate {
    fn from(product: NewProduct) -> Self {
        Self {
            name: Some(product.name),
            price: Some(product.price),
        }
    }
}

/// Render a stored price as a fixed-point string with two decimal places.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    let mut price = price;

    price.rescale(PRICE_SCALE);

    price.to_string()
}
