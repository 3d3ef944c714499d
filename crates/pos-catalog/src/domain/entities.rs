//! Catalog entities: categories and products.

use pos_types::{CategoryId, ProductId, UNSAVED};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A node in the category forest.
///
/// `parent_id` is a plain id reference; child lists are rebuilt on demand
/// from a side index rather than held as live back-references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned id (`0` until first save).
    pub id: CategoryId,
    /// Unique display name.
    pub name: String,
    pub description: Option<String>,
    /// Parent category, `None` for roots.
    pub parent_id: Option<CategoryId>,
    /// Position among siblings; assigned on create when unset.
    pub sort_order: Option<i32>,
    pub active: bool,
}

impl Category {
    /// New root category draft with defaults applied.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED,
            name: name.into(),
            description: None,
            parent_id: None,
            sort_order: None,
            active: true,
        }
    }

    /// New child category draft under `parent_id`.
    pub fn child_of(name: impl Into<String>, parent_id: CategoryId) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(name)
        }
    }
}

/// Replacement values for a category update.
///
/// All fields are applied wholesale; `parent_id = None` promotes the
/// category to the root set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub sort_order: Option<i32>,
    pub active: bool,
}

impl From<&Category> for CategoryUpdate {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id,
            sort_order: category.sort_order,
            active: category.active,
        }
    }
}

/// A category annotated with its subtree, produced by `CategoryManager::tree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Total number of categories in this subtree, the root included.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Product lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
    OutOfStock,
    Discontinued,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::OutOfStock => "OUT_OF_STOCK",
            Self::Discontinued => "DISCONTINUED",
        };
        f.write_str(s)
    }
}

/// A sellable product.
///
/// Stock on hand is intentionally absent: it is derived from the inventory
/// ledger, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned id (`0` until first save).
    pub id: ProductId,
    pub name: String,
    /// Unique stock-keeping unit. Empty on a draft means "generate one".
    pub sku: String,
    /// Unique when present.
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Decimal,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    /// Percentage in the range 0–100.
    pub tax_rate: Decimal,
    pub min_stock_level: i64,
    pub max_stock_level: i64,
    pub status: ProductStatus,
}

impl Product {
    /// New product draft with defaults applied. The SKU is left empty so the
    /// manager generates one on create.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED,
            name: name.into(),
            sku: String::new(),
            barcode: None,
            description: None,
            category_id: None,
            price: Decimal::ZERO,
            cost_price: Decimal::ZERO,
            sale_price: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            min_stock_level: 0,
            max_stock_level: 0,
            status: ProductStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_draft_defaults() {
        let category = Category::new("Electronics");
        assert_eq!(category.id, UNSAVED);
        assert!(category.active);
        assert!(category.parent_id.is_none());
        assert!(category.sort_order.is_none());
    }

    #[test]
    fn test_child_of_sets_parent() {
        let child = Category::child_of("Phones", 7);
        assert_eq!(child.parent_id, Some(7));
    }

    #[test]
    fn test_product_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&ProductStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"OUT_OF_STOCK\"");
    }

    #[test]
    fn test_node_len_counts_subtree() {
        let node = CategoryNode {
            category: Category::new("root"),
            children: vec![
                CategoryNode {
                    category: Category::new("a"),
                    children: vec![],
                },
                CategoryNode {
                    category: Category::new("b"),
                    children: vec![CategoryNode {
                        category: Category::new("c"),
                        children: vec![],
                    }],
                },
            ],
        };
        assert_eq!(node.len(), 4);
    }
}
