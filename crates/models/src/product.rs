use serde::{Deserialize, Serialize};

use crate::Keyed;

/// Catalog product record.
///
/// No range checks apply to any field: negative price/stock and
/// out-of-range ratings are stored as supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Keyed for Product {
    fn id(&self) -> u64 {
        self.id
    }
}
