//! Serializable snapshot of a finished design.

use crate::pricing::Price;
use crate::product::{ProductColor, ProductKind, ProductSize};
use serde::{Deserialize, Serialize};

/// What the "add to cart" button reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub product: ProductKind,
    pub size: ProductSize,
    pub color: ProductColor,
    pub images: usize,
    pub texts: usize,
    pub price: Price,
}

impl DesignSummary {
    /// Render as a single-line JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        let summary = DesignSummary {
            product: ProductKind::Mug,
            size: ProductSize::Large,
            color: ProductColor::Red,
            images: 1,
            texts: 2,
            price: 460,
        };
        let json = summary.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["product"], "Mug");
        assert_eq!(value["images"], 1);
        assert_eq!(value["texts"], 2);
        assert_eq!(value["price"], 460);
    }
}
