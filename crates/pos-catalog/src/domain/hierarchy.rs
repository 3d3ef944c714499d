//! Category hierarchy manager.
//!
//! Maintains a forest of categories with stable sibling ordering and safe
//! structural edits. The parent graph must stay acyclic; the descendant
//! guard walks the proposed parent's subtree depth-first and relies on the
//! tree already being acyclic (the walk itself carries no cycle guard).

use std::sync::Arc;

use pos_types::CategoryId;
use tracing::info;

use super::entities::{Category, CategoryNode, CategoryUpdate};
use super::errors::CatalogError;
use crate::ports::{CategoryStore, ProductStore};

/// Manager for the category forest.
pub struct CategoryManager<C, P> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C: CategoryStore, P: ProductStore> CategoryManager<C, P> {
    pub fn new(categories: Arc<C>, products: Arc<P>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Creates a category.
    ///
    /// # Errors
    /// - `DuplicateName` if the name is already taken (exact match)
    /// - `ParentNotFound` if a given parent id does not resolve
    ///
    /// When the sort position is unset it becomes
    /// `max(existing siblings' positions, 0) + 1`, siblings being the
    /// categories under the same parent (the root set for `None`).
    pub fn create(&self, mut category: Category) -> Result<Category, CatalogError> {
        if self.categories.exists_by_name(&category.name)? {
            return Err(CatalogError::DuplicateName(category.name));
        }

        if let Some(parent_id) = category.parent_id {
            self.categories
                .find_by_id(parent_id)?
                .ok_or(CatalogError::ParentNotFound(parent_id))?;
        }

        if category.sort_order.is_none() {
            category.sort_order = Some(self.next_sort_order(category.parent_id)?);
        }

        let saved = self.categories.save(category)?;
        info!(category_id = saved.id, name = %saved.name, "category created");
        Ok(saved)
    }

    /// Applies replacement values to a category.
    ///
    /// # Errors
    /// - `CategoryNotFound` if the id does not resolve
    /// - `DuplicateName` if the new name belongs to a different category
    /// - `SelfParent` / `DescendantParent` if reparenting would break the tree
    /// - `ParentNotFound` if the new parent id does not resolve
    pub fn update(
        &self,
        id: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CatalogError> {
        let mut existing = self.require(id)?;

        if existing.name != update.name && self.categories.exists_by_name(&update.name)? {
            return Err(CatalogError::DuplicateName(update.name));
        }

        self.guard_reparent(id, update.parent_id)?;

        existing.name = update.name;
        existing.description = update.description;
        existing.parent_id = update.parent_id;
        existing.sort_order = update.sort_order;
        existing.active = update.active;

        let saved = self.categories.save(existing)?;
        info!(category_id = id, "category updated");
        Ok(saved)
    }

    /// Deletes a category once the usage guards pass.
    ///
    /// # Errors
    /// - `CategoryNotFound` if the id does not resolve
    /// - `HasSubcategories` if any category has this one as parent
    /// - `HasProducts` if products are still filed under it
    pub fn delete(&self, id: CategoryId) -> Result<(), CatalogError> {
        self.require(id)?;

        if !self.categories.find_children(id)?.is_empty() {
            return Err(CatalogError::HasSubcategories(id));
        }

        let count = self.products.count_by_category(id)?;
        if count > 0 {
            return Err(CatalogError::HasProducts { id, count });
        }

        self.categories.delete(id)?;
        info!(category_id = id, "category deleted");
        Ok(())
    }

    /// Reparents a category; `None` promotes it to the root set.
    ///
    /// Same cycle guards as [`CategoryManager::update`].
    pub fn move_to(
        &self,
        id: CategoryId,
        new_parent: Option<CategoryId>,
    ) -> Result<Category, CatalogError> {
        let mut category = self.require(id)?;

        self.guard_reparent(id, new_parent)?;

        category.parent_id = new_parent;
        let saved = self.categories.save(category)?;
        info!(category_id = id, parent_id = ?new_parent, "category moved");
        Ok(saved)
    }

    /// Assigns sort position `index + 1` to each category in the given
    /// order. No same-parent constraint: the ids may span mixed parents.
    ///
    /// # Errors
    /// - `CategoryNotFound` on the first id that does not resolve; nothing
    ///   is persisted in that case
    pub fn reorder(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CatalogError> {
        let fetched = self.categories.find_by_ids(ids)?;

        let mut reordered = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            let mut category = fetched
                .iter()
                .find(|c| c.id == *id)
                .cloned()
                .ok_or(CatalogError::CategoryNotFound(*id))?;
            category.sort_order = Some(index as i32 + 1);
            reordered.push(category);
        }

        let saved = self.categories.save_all(reordered)?;
        info!(count = saved.len(), "categories reordered");
        Ok(saved)
    }

    /// Returns the root categories, each annotated with its subtree.
    /// Read-only: no sort or parent fields are touched. Siblings come out
    /// ordered by sort position.
    pub fn tree(&self) -> Result<Vec<CategoryNode>, CatalogError> {
        let mut roots = self.categories.find_roots()?;
        sort_siblings(&mut roots);

        roots
            .into_iter()
            .map(|root| self.build_node(root))
            .collect()
    }

    /// Updates only the sort position.
    pub fn set_sort_order(&self, id: CategoryId, sort_order: i32) -> Result<Category, CatalogError> {
        let mut category = self.require(id)?;
        category.sort_order = Some(sort_order);
        self.categories.save(category)
    }

    /// Toggles the active flag.
    pub fn set_active(&self, id: CategoryId, active: bool) -> Result<Category, CatalogError> {
        let mut category = self.require(id)?;
        category.active = active;
        let saved = self.categories.save(category)?;
        info!(category_id = id, active, "category status toggled");
        Ok(saved)
    }

    // ---- queries -----------------------------------------------------------

    pub fn find(&self, id: CategoryId) -> Result<Option<Category>, CatalogError> {
        self.categories.find_by_id(id)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<Category>, CatalogError> {
        self.categories.find_by_name(name)
    }

    pub fn all(&self) -> Result<Vec<Category>, CatalogError> {
        self.categories.find_all()
    }

    pub fn roots(&self) -> Result<Vec<Category>, CatalogError> {
        self.categories.find_roots()
    }

    pub fn subcategories(&self, parent_id: CategoryId) -> Result<Vec<Category>, CatalogError> {
        self.categories.find_children(parent_id)
    }

    pub fn active(&self) -> Result<Vec<Category>, CatalogError> {
        self.categories.find_active()
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<Category>, CatalogError> {
        self.categories.search(keyword)
    }

    pub fn exists_by_name(&self, name: &str) -> Result<bool, CatalogError> {
        self.categories.exists_by_name(name)
    }

    pub fn product_count(&self, id: CategoryId) -> Result<u64, CatalogError> {
        self.products.count_by_category(id)
    }

    pub fn has_subcategories(&self, id: CategoryId) -> Result<bool, CatalogError> {
        Ok(!self.categories.find_children(id)?.is_empty())
    }

    pub fn has_products(&self, id: CategoryId) -> Result<bool, CatalogError> {
        Ok(self.product_count(id)? > 0)
    }

    // ---- internals ---------------------------------------------------------

    fn require(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.categories
            .find_by_id(id)?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// Rejects self-parenting and moves under the category's own subtree.
    fn guard_reparent(
        &self,
        id: CategoryId,
        new_parent: Option<CategoryId>,
    ) -> Result<(), CatalogError> {
        let Some(parent_id) = new_parent else {
            return Ok(());
        };

        if parent_id == id {
            return Err(CatalogError::SelfParent(id));
        }

        self.categories
            .find_by_id(parent_id)?
            .ok_or(CatalogError::ParentNotFound(parent_id))?;

        if self.is_descendant(parent_id, id)? {
            return Err(CatalogError::DescendantParent {
                id,
                parent: parent_id,
            });
        }

        Ok(())
    }

    /// Depth-first walk of `ancestor`'s subtree looking for `target`.
    /// Assumes the tree is already acyclic.
    fn is_descendant(
        &self,
        ancestor: CategoryId,
        target: CategoryId,
    ) -> Result<bool, CatalogError> {
        if ancestor == target {
            return Ok(true);
        }

        for child in self.categories.find_children(ancestor)? {
            if self.is_descendant(child.id, target)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn build_node(&self, category: Category) -> Result<CategoryNode, CatalogError> {
        let mut children = self.categories.find_children(category.id)?;
        sort_siblings(&mut children);

        let children = children
            .into_iter()
            .map(|child| self.build_node(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CategoryNode { category, children })
    }

    /// Next sibling-scoped sort position: `max(existing, 0) + 1`.
    fn next_sort_order(&self, parent_id: Option<CategoryId>) -> Result<i32, CatalogError> {
        let siblings = match parent_id {
            Some(parent_id) => self.categories.find_children(parent_id)?,
            None => self.categories.find_roots()?,
        };

        let max = siblings
            .iter()
            .map(|c| c.sort_order.unwrap_or(0))
            .max()
            .unwrap_or(0)
            .max(0);

        Ok(max + 1)
    }
}

fn sort_siblings(siblings: &mut [Category]) {
    siblings.sort_by_key(|c| (c.sort_order.unwrap_or(0), c.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryCategoryStore, MemoryProductStore};
    use crate::domain::Product;

    fn manager() -> CategoryManager<MemoryCategoryStore, MemoryProductStore> {
        CategoryManager::new(
            Arc::new(MemoryCategoryStore::new()),
            Arc::new(MemoryProductStore::new()),
        )
    }

    fn manager_with_products() -> (
        CategoryManager<MemoryCategoryStore, MemoryProductStore>,
        Arc<MemoryProductStore>,
    ) {
        let products = Arc::new(MemoryProductStore::new());
        let manager = CategoryManager::new(
            Arc::new(MemoryCategoryStore::new()),
            Arc::clone(&products),
        );
        (manager, products)
    }

    #[test]
    fn test_create_assigns_sibling_scoped_sort_order() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        let b = manager.create(Category::new("B")).unwrap();
        assert_eq!(a.sort_order, Some(1));
        assert_eq!(b.sort_order, Some(2));

        // Children start their own sequence.
        let child = manager.create(Category::child_of("A1", a.id)).unwrap();
        assert_eq!(child.sort_order, Some(1));
    }

    #[test]
    fn test_create_rejects_duplicate_name() {
        let manager = manager();
        manager.create(Category::new("Electronics")).unwrap();
        let err = manager.create(Category::new("Electronics")).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("Electronics".into()));
    }

    #[test]
    fn test_create_rejects_missing_parent() {
        let manager = manager();
        let err = manager.create(Category::child_of("Phones", 999)).unwrap_err();
        assert_eq!(err, CatalogError::ParentNotFound(999));
    }

    #[test]
    fn test_update_rejects_rename_collision() {
        let manager = manager();
        manager.create(Category::new("A")).unwrap();
        let b = manager.create(Category::new("B")).unwrap();

        let mut update = CategoryUpdate::from(&b);
        update.name = "A".into();
        let err = manager.update(b.id, update).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("A".into()));
    }

    #[test]
    fn test_update_keeps_own_name() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();

        // Re-submitting the same name is not a collision.
        let updated = manager.update(a.id, CategoryUpdate::from(&a)).unwrap();
        assert_eq!(updated.name, "A");
    }

    #[test]
    fn test_self_parent_rejected() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        let err = manager.move_to(a.id, Some(a.id)).unwrap_err();
        assert_eq!(err, CatalogError::SelfParent(a.id));
    }

    #[test]
    fn test_cycle_rejected_and_tree_unchanged() {
        let manager = manager();
        let electronics = manager.create(Category::new("Electronics")).unwrap();
        let phones = manager
            .create(Category::child_of("Phones", electronics.id))
            .unwrap();

        // Moving the root under its own descendant must fail.
        let err = manager
            .move_to(electronics.id, Some(phones.id))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DescendantParent {
                id: electronics.id,
                parent: phones.id
            }
        );

        // Tree unchanged: Electronics still the root, Phones its child.
        let tree = manager.tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].category.id, electronics.id);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].category.id, phones.id);
    }

    #[test]
    fn test_deep_cycle_rejected() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        let b = manager.create(Category::child_of("B", a.id)).unwrap();
        let c = manager.create(Category::child_of("C", b.id)).unwrap();

        let err = manager.move_to(a.id, Some(c.id)).unwrap_err();
        assert!(matches!(err, CatalogError::DescendantParent { .. }));
    }

    #[test]
    fn test_move_to_root() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        let b = manager.create(Category::child_of("B", a.id)).unwrap();

        let moved = manager.move_to(b.id, None).unwrap();
        assert_eq!(moved.parent_id, None);
        assert_eq!(manager.roots().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_rejects_category_with_children() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        manager.create(Category::child_of("B", a.id)).unwrap();

        let err = manager.delete(a.id).unwrap_err();
        assert_eq!(err, CatalogError::HasSubcategories(a.id));
    }

    #[test]
    fn test_delete_rejects_category_with_products() {
        let (manager, products) = manager_with_products();
        let a = manager.create(Category::new("A")).unwrap();

        let mut product = Product::new("Widget");
        product.sku = "SKU-1".into();
        product.category_id = Some(a.id);
        products.save(product).unwrap();

        let err = manager.delete(a.id).unwrap_err();
        assert_eq!(err, CatalogError::HasProducts { id: a.id, count: 1 });
    }

    #[test]
    fn test_delete_empty_category_succeeds() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        manager.delete(a.id).unwrap();
        assert!(manager.find(a.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_category() {
        let manager = manager();
        assert_eq!(
            manager.delete(42).unwrap_err(),
            CatalogError::CategoryNotFound(42)
        );
    }

    #[test]
    fn test_reorder_assigns_positions_in_given_order() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        let b = manager.create(Category::new("B")).unwrap();
        let c = manager.create(Category::new("C")).unwrap();

        let reordered = manager.reorder(&[c.id, a.id, b.id]).unwrap();
        let sort_of = |id| {
            reordered
                .iter()
                .find(|cat| cat.id == id)
                .unwrap()
                .sort_order
        };
        assert_eq!(sort_of(c.id), Some(1));
        assert_eq!(sort_of(a.id), Some(2));
        assert_eq!(sort_of(b.id), Some(3));
    }

    #[test]
    fn test_reorder_fails_on_unknown_id_without_saving() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();

        let err = manager.reorder(&[a.id, 777]).unwrap_err();
        assert_eq!(err, CatalogError::CategoryNotFound(777));

        // Original sort position untouched.
        assert_eq!(manager.find(a.id).unwrap().unwrap().sort_order, Some(1));
    }

    #[test]
    fn test_tree_orders_siblings_by_sort_position() {
        let manager = manager();
        let a = manager.create(Category::new("A")).unwrap();
        let b = manager.create(Category::new("B")).unwrap();
        manager.reorder(&[b.id, a.id]).unwrap();

        let tree = manager.tree().unwrap();
        assert_eq!(tree[0].category.id, b.id);
        assert_eq!(tree[1].category.id, a.id);
    }
}
