//! Product category value type.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Selectable product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductCategory {
    /// Category identifier
    #[schema(example = "6f9619ff-8b86-d011-b42d-00c04fc964ff")]
    pub product_category_id: Uuid,
    /// Display name
    #[schema(example = "Insurance")]
    pub product_category_name: String,
}
