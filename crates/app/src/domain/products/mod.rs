//! Products

pub mod data;
pub mod errors;
pub mod records;
pub mod repository;

pub use errors::{FieldError, ProductsRepositoryError, ValidationError};
pub use records::{ProductId, ProductRecord};
pub use repository::*;
