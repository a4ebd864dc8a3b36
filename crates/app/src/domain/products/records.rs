//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// Database-assigned id.
    pub id: ProductId,
    /// Trimmed product name.
    pub name: String,
    /// Unit price with two decimal places.
    pub price: Decimal,
    /// Insertion time.
    pub created_at: Timestamp,
    /// Time of the last write.
    pub updated_at: Timestamp,
}
