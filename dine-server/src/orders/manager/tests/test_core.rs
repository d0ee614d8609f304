use super::*;

#[tokio::test]
async fn test_create_order() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "1", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 2, 10.0)], 20.0))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.table, table.id);
    assert_eq!(order.total_amount, 20.0);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].item, burger.id);
    assert!(order.id.starts_with("orders:"));
    assert!(order.order_number.starts_with("ORD-"));
    assert_eq!(order.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn test_create_accepts_bare_keys() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "2", 2).await;
    let soup = seed_menu_item(&db, "Soup", 6.0, true).await;

    let table_key = table.id.trim_start_matches("dining_table:");
    let item_key = soup.id.trim_start_matches("menu_item:");
    let order = manager
        .create_order(create_payload(table_key, vec![line(item_key, 1, 6.0)], 6.0))
        .await
        .unwrap();

    // stored references are canonical
    assert_eq!(order.table, table.id);
    assert_eq!(order.items[0].item, soup.id);
}

#[tokio::test]
async fn test_price_is_captured_at_order_time() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "3", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    MenuItemRepository::new(db.clone())
        .update(
            &burger.id,
            shared::models::MenuItemUpdate {
                price: Some(14.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let detail = manager.get_order(&order.id).await.unwrap();
    assert_eq!(detail.items[0].price, 10.0);
    assert_eq!(detail.items[0].item.as_ref().unwrap().price, 14.0);
}

#[tokio::test]
async fn test_create_rejects_invalid_payload_without_writes() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "4", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    // empty items
    let err = manager
        .create_order(create_payload(&table.id, vec![], 10.0))
        .await
        .unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::OrderEmpty);

    // non-positive price on one item
    let err = manager
        .create_order(create_payload(
            &table.id,
            vec![line(&burger.id, 1, 10.0), line(&burger.id, 1, 0.0)],
            10.0,
        ))
        .await
        .unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::OrderItemInvalidPrice);

    // missing total
    let mut payload = create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0);
    payload.total_amount = None;
    let err = manager.create_order(payload).await.unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::RequiredField);

    // unknown table
    let err = manager
        .create_order(create_payload(
            "dining_table:missing",
            vec![line(&burger.id, 1, 10.0)],
            10.0,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::TableNotFound(_)));

    assert!(manager.get_all_orders().await.unwrap().is_empty());
    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.current_order.is_none());
}

#[tokio::test]
async fn test_create_rejects_unknown_or_unavailable_menu_item() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "5", 4).await;
    let special = seed_menu_item(&db, "Special", 25.0, false).await;

    let err = manager
        .create_order(create_payload(
            &table.id,
            vec![line("menu_item:nothere", 1, 5.0)],
            5.0,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::MenuItemNotFound(_)));

    let err = manager
        .create_order(create_payload(&table.id, vec![line(&special.id, 1, 25.0)], 25.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::MenuItemUnavailable(_)));

    assert!(manager.get_all_orders().await.unwrap().is_empty());
    assert_eq!(load_table(&db, &table.id).await.status, TableStatus::Available);
}

#[tokio::test]
async fn test_total_mismatch_is_stored_as_supplied() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "6", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 2, 10.0)], 25.0))
        .await
        .unwrap();
    assert_eq!(order.total_amount, 25.0);
}

#[tokio::test]
async fn test_order_numbers_are_unique() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "7", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let mut numbers = std::collections::HashSet::new();
    for _ in 0..10 {
        let order = manager
            .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
            .await
            .unwrap();
        assert!(numbers.insert(order.order_number));
    }
}

#[tokio::test]
async fn test_get_order_not_found() {
    let (manager, _db) = create_test_manager().await;
    let err = manager.get_order("orders:missing").await.unwrap_err();
    assert!(matches!(err, ManagerError::OrderNotFound(_)));

    // ids of another table never resolve
    let err = manager.get_order("dining_table:missing").await.unwrap_err();
    assert!(matches!(err, ManagerError::OrderNotFound(_)));
}

#[tokio::test]
async fn test_update_status_validation() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "8", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    let err = manager
        .update_order_status(&order.id, OrderStatusUpdate { status: None })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please provide order status");
    assert_eq!(validation_code(err), ErrorCode::RequiredField);

    let err = manager
        .update_order_status(&order.id, status_payload("finished"))
        .await
        .unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::OrderInvalidStatus);

    let err = manager
        .update_order_status("orders:missing", status_payload("served"))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::OrderNotFound(_)));

    // nothing changed
    let detail = manager.get_order(&order.id).await.unwrap();
    assert_eq!(detail.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_status_transitions_are_permissive() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "9", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    for status in ["complete", "pending", "cancelled", "served"] {
        let detail = manager
            .update_order_status(&order.id, status_payload(status))
            .await
            .unwrap();
        assert_eq!(detail.status.as_str(), status);
    }
}

#[tokio::test]
async fn test_update_order_contents() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "10", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let fries = seed_menu_item(&db, "Fries", 4.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    // total only: items untouched
    let detail = manager
        .update_order(
            &order.id,
            OrderUpdate {
                items: None,
                total_amount: Some(12.0),
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.total_amount, 12.0);
    assert_eq!(detail.items.len(), 1);

    // items and total
    let detail = manager
        .update_order(
            &order.id,
            OrderUpdate {
                items: Some(vec![line(&burger.id, 1, 10.0), line(&fries.id, 2, 4.0)]),
                total_amount: Some(18.0),
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[1].item.as_ref().unwrap().name, "Fries");
    assert_eq!(detail.total_amount, 18.0);
    assert_eq!(detail.table.as_ref().unwrap().id, table.id);
}

#[tokio::test]
async fn test_update_order_rejects_bad_price_without_partial_write() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "11", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    let err = manager
        .update_order(
            &order.id,
            OrderUpdate {
                items: Some(vec![line(&burger.id, 3, -1.0)]),
                total_amount: Some(99.0),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::OrderItemInvalidPrice);

    // an order cannot be emptied through an update
    let err = manager
        .update_order(
            &order.id,
            OrderUpdate {
                items: Some(vec![]),
                total_amount: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(validation_code(err), ErrorCode::OrderEmpty);

    let detail = manager.get_order(&order.id).await.unwrap();
    assert_eq!(detail.total_amount, 10.0);
    assert_eq!(detail.items[0].quantity, 1);

    let err = manager
        .update_order("orders:missing", OrderUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::OrderNotFound(_)));
}

#[tokio::test]
async fn test_update_order_after_menu_item_withdrawn() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "12", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let fries = seed_menu_item(&db, "Fries", 4.0, true).await;
    let order = manager
        .create_order(create_payload(
            &table.id,
            vec![line(&burger.id, 1, 10.0), line(&fries.id, 1, 4.0)],
            14.0,
        ))
        .await
        .unwrap();

    let menu = MenuItemRepository::new(db.clone());
    menu.update(
        &burger.id,
        shared::models::MenuItemUpdate {
            is_available: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(menu.delete(&fries.id).await.unwrap());

    // bare key is stored in canonical form
    let (_, burger_key) = burger.id.split_once(':').unwrap();
    let detail = manager
        .update_order(
            &order.id,
            OrderUpdate {
                items: Some(vec![line(burger_key, 2, 10.0), line(&fries.id, 3, 4.0)]),
                total_amount: Some(32.0),
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.items[0].item_id, burger.id);
    assert_eq!(detail.items[0].quantity, 2);
    assert!(!detail.items[0].item.as_ref().unwrap().is_available);
    assert_eq!(detail.items[1].item_id, fries.id);
    assert_eq!(detail.items[1].quantity, 3);
    assert!(detail.items[1].item.is_none());
    assert_eq!(detail.total_amount, 32.0);

    // a reference into another table is still rejected
    let err = manager
        .update_order(
            &order.id,
            OrderUpdate {
                items: Some(vec![line("category:mains", 1, 10.0)]),
                total_amount: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::MenuItemNotFound(_)));
    assert_eq!(manager.get_order(&order.id).await.unwrap().items.len(), 2);
}

#[tokio::test]
async fn test_queries_by_table_and_status() {
    let (manager, db) = create_test_manager().await;
    let t1 = seed_table(&db, "12", 4).await;
    let t2 = seed_table(&db, "13", 2).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let first = manager
        .create_order(create_payload(&t1.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = manager
        .create_order(create_payload(&t1.id, vec![line(&burger.id, 2, 10.0)], 20.0))
        .await
        .unwrap();
    let other = manager
        .create_order(create_payload(&t2.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();
    manager
        .update_order_status(&other.id, status_payload("served"))
        .await
        .unwrap();

    let all = manager.get_all_orders().await.unwrap();
    assert_eq!(all.len(), 3);

    let on_t1 = manager.get_orders_by_table(&t1.id).await.unwrap();
    assert_eq!(on_t1.len(), 2);
    // newest first
    assert_eq!(on_t1[0].id, second.id);
    assert_eq!(on_t1[1].id, first.id);
    assert_eq!(on_t1[0].table.as_ref().unwrap().table_number, "12");

    let served = manager.get_orders_by_status("served").await.unwrap();
    assert_eq!(served.len(), 1);
    assert_eq!(served[0].id, other.id);

    assert_eq!(manager.get_orders_by_status("pending").await.unwrap().len(), 2);
    assert!(manager.get_orders_by_status("bogus").await.unwrap().is_empty());
    assert!(
        manager
            .get_orders_by_table("dining_table:nobody")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_detail_with_deleted_references() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "14", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    DiningTableRepository::new(db.clone())
        .delete(&table.id)
        .await
        .unwrap();
    MenuItemRepository::new(db.clone())
        .delete(&burger.id)
        .await
        .unwrap();

    let detail = manager.get_order(&order.id).await.unwrap();
    assert_eq!(detail.table_id, table.id);
    assert!(detail.table.is_none());
    assert_eq!(detail.items[0].item_id, burger.id);
    assert!(detail.items[0].item.is_none());
}
