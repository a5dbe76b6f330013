//! # Domain Types
//!
//! Catalog types used throughout Sepet.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Catalog      │ 1    * │    Product      │                        │
//! │  │  ─────────────  │───────►│  ─────────────  │                        │
//! │  │  products (Vec) │        │  id (u32)       │                        │
//! │  │  unique ids     │        │  name           │                        │
//! │  └─────────────────┘        │  price (Money)  │                        │
//! │                             └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is built once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use ts_rs::TS;

use crate::error::CartResult;
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name};
use crate::ValidationError;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price (never negative).
    pub price: Money,
}

impl Product {
    /// Creates a validated product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> CartResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            id: id.into(),
            name,
            price,
        })
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The fixed, ordered product list offered to the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    pub fn new(products: Vec<Product>) -> CartResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.to_string(),
                }
                .into());
            }
        }

        Ok(Catalog { products })
    }

    /// The three demo products the shop starts with.
    pub fn demo() -> Self {
        Catalog {
            products: vec![
                Product {
                    id: ProductId(1),
                    name: "Ürün A".to_string(),
                    price: Money::from_major(25),
                },
                Product {
                    id: ProductId(2),
                    name: "Ürün B".to_string(),
                    price: Money::from_major(40),
                },
                Product {
                    id: ProductId(3),
                    name: "Ürün C".to_string(),
                    price: Money::from_major(35),
                },
            ],
        }
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CartError;

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(ProductId(2)).map(|p| p.price.cents()), Some(4000));
        assert!(catalog.get(ProductId(9)).is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let a = Product::new(1, "A", Money::from_major(1)).unwrap();
        let b = Product::new(1, "B", Money::from_major(2)).unwrap();

        let err = Catalog::new(vec![a, b]).unwrap_err();
        assert!(matches!(
            err,
            CartError::InvalidArgument(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_product_rejects_negative_price() {
        assert!(Product::new(1, "A", Money::from_cents(-1)).is_err());
        assert!(Product::new(1, "A", Money::zero()).is_ok());
    }

    #[test]
    fn test_product_id_serializes_as_number() {
        let json = serde_json::to_string(&ProductId(3)).unwrap();
        assert_eq!(json, "3");
    }
}
