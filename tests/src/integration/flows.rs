//! # Integration Test Flows
//!
//! End-to-end back-office flows across subsystems:
//!
//! 1. **Catalog → Inventory**: products created in the catalog resolve
//!    through the bridged product directory; stock and valuation derive
//!    from recorded movements.
//! 2. **Orders → Inventory**: fulfilment records sale movements referenced
//!    back to the order.
//! 3. **Orders → Customers**: customers with orders on file cannot be
//!    deleted through the bridged order directory.
//!
//! All services share one code generator, so HD/KH/SKU sequences are
//! globally sequential within each test.

#[cfg(test)]
mod tests {
    use crate::{init_tracing, Backoffice};

    use pos_catalog::domain::{Category, Product};
    use pos_customers::domain::{Customer, CustomerError};
    use pos_inventory::domain::REFERENCE_SALE;
    use pos_orders::domain::{Order, OrderItem, OrderStatus};
    use rust_decimal_macros::dec;

    fn stocked_product(office: &Backoffice, name: &str, qty: i64) -> Product {
        let product = office.products.create(Product::new(name)).unwrap();
        office
            .inventory
            .record_in(product.id, qty, Some(dec!(10)), Some("PO-1"))
            .unwrap();
        product
    }

    #[test]
    fn test_receiving_flow_catalog_to_ledger() {
        init_tracing();
        let office = Backoffice::new();

        let drinks = office
            .categories
            .create(Category::new("Drinks"))
            .unwrap();

        let mut draft = Product::new("Green Tea 500ml");
        draft.category_id = Some(drinks.id);
        draft.price = dec!(12);
        draft.cost_price = dec!(7);
        let tea = office.products.create(draft).unwrap();
        assert!(tea.sku.starts_with("SKU"));

        // Goods receipt, partial sale, and a customer return.
        office
            .inventory
            .record_in(tea.id, 100, Some(dec!(7)), Some("PO-77"))
            .unwrap();
        office
            .inventory
            .record_out(tea.id, 30, Some(dec!(7)), Some("SO-12"))
            .unwrap();
        office
            .inventory
            .record_return(tea.id, 5, Some(dec!(7)), Some("RMA-3"))
            .unwrap();

        assert_eq!(office.inventory.current_stock(tea.id).unwrap(), 75);
        // 100×7 + 5×7; the out carries no valuation.
        assert_eq!(office.inventory.inventory_value(tea.id).unwrap(), dec!(735));
    }

    #[test]
    fn test_ledger_rejects_products_missing_from_catalog() {
        let office = Backoffice::new();
        assert!(office.inventory.record_in(999, 10, None, None).is_err());
    }

    #[test]
    fn test_low_stock_report_uses_catalog_thresholds() {
        let office = Backoffice::new();

        let mut draft = Product::new("Batteries AA");
        draft.min_stock_level = 20;
        let batteries = office.products.create(draft).unwrap();
        let gum = office.products.create(Product::new("Gum")).unwrap();

        office
            .inventory
            .record_in(batteries.id, 15, None, None)
            .unwrap();
        office.inventory.record_in(gum.id, 50, None, None).unwrap();

        assert_eq!(
            office.inventory.low_stock_product_ids().unwrap(),
            vec![batteries.id]
        );
    }

    #[test]
    fn test_order_lifecycle_with_payment() {
        init_tracing();
        let office = Backoffice::new();

        let alice = office.customers.create(Customer::new("Alice")).unwrap();
        let tea = stocked_product(&office, "Green Tea 500ml", 100);
        let mug = stocked_product(&office, "Ceramic Mug", 40);

        let mut draft = Order::new(Some(alice.id))
            .with_item(OrderItem::new(tea.id, 2, dec!(100)))
            .with_item(OrderItem::new(mug.id, 1, dec!(50)).with_discount(dec!(5)));
        draft.shipping_fee = dec!(10);
        draft.tax_amount = dec!(4);
        draft.discount_amount = dec!(14);
        let order = office.orders.create(draft).unwrap();

        assert_eq!(order.order_number, "HD0001");
        assert_eq!(order.total_amount, Some(dec!(245)));

        // Exact payment confirms; then walk the order to Delivered.
        let order = office
            .orders
            .process_payment(order.id, dec!(245), "CARD")
            .unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);

        office
            .orders
            .update_status(order.id, OrderStatus::Processing)
            .unwrap();
        office
            .orders
            .update_status(order.id, OrderStatus::Shipped)
            .unwrap();
        let delivered = office
            .orders
            .update_status(order.id, OrderStatus::Delivered)
            .unwrap();
        assert!(delivered.delivery_date.is_some());

        assert_eq!(
            office.orders.revenue(&[OrderStatus::Delivered]).unwrap(),
            dec!(245)
        );
    }

    #[test]
    fn test_fulfilment_records_sale_movements_against_order() {
        let office = Backoffice::new();

        let tea = stocked_product(&office, "Green Tea 500ml", 100);
        let order = office
            .orders
            .create(Order::new(None).with_item(OrderItem::new(tea.id, 30, dec!(12))))
            .unwrap();

        // Pick the stock for the order and tag the movement with it.
        let movement = office
            .inventory
            .record_out(tea.id, 30, Some(dec!(7)), Some(&order.order_number))
            .unwrap();
        assert_eq!(office.inventory.current_stock(tea.id).unwrap(), 70);

        let sales = office
            .inventory
            .transactions_by_reference(REFERENCE_SALE, None)
            .unwrap();
        assert_eq!(sales, vec![movement]);
        assert_eq!(
            office
                .inventory
                .search_notes(&order.order_number)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_oversell_is_rejected_after_fulfilment() {
        let office = Backoffice::new();
        let tea = stocked_product(&office, "Green Tea 500ml", 10);

        office.inventory.record_out(tea.id, 8, None, None).unwrap();
        assert!(office.inventory.record_out(tea.id, 5, None, None).is_err());
        assert_eq!(office.inventory.current_stock(tea.id).unwrap(), 2);
    }

    #[test]
    fn test_customer_with_orders_cannot_be_deleted() {
        let office = Backoffice::new();

        let alice = office.customers.create(Customer::new("Alice")).unwrap();
        let tea = stocked_product(&office, "Green Tea 500ml", 10);
        office
            .orders
            .create(Order::new(Some(alice.id)).with_item(OrderItem::new(tea.id, 1, dec!(12))))
            .unwrap();

        assert_eq!(
            office.customers.delete(alice.id),
            Err(CustomerError::HasOrders {
                id: alice.id,
                count: 1
            })
        );

        // Cancelled orders still count as references.
        let orders = office.orders.by_customer(alice.id).unwrap();
        office
            .orders
            .cancel(orders[0].id, "changed mind")
            .unwrap();
        assert!(office.customers.delete(alice.id).is_err());
    }

    #[test]
    fn test_shared_generator_keeps_codes_sequential() {
        let office = Backoffice::new();

        let a = office.customers.create(Customer::new("Alice")).unwrap();
        let b = office.customers.create(Customer::new("Bob")).unwrap();
        assert_eq!(a.customer_code, "KH000001");
        assert_eq!(b.customer_code, "KH000002");

        let tea = stocked_product(&office, "Green Tea 500ml", 5);
        let first = office
            .orders
            .create(Order::new(Some(a.id)).with_item(OrderItem::new(tea.id, 1, dec!(12))))
            .unwrap();
        let second = office
            .orders
            .create(Order::new(Some(b.id)).with_item(OrderItem::new(tea.id, 1, dec!(12))))
            .unwrap();
        assert_eq!(first.order_number, "HD0001");
        assert_eq!(second.order_number, "HD0002");
    }
}
