use super::*;

#[tokio::test]
async fn test_create_occupies_table() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "1", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 2, 10.0)], 20.0))
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.current_order.as_deref(), Some(order.id.as_str()));
}

#[tokio::test]
async fn test_complete_releases_table() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "2", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    let detail = manager
        .update_order_status(&order.id, status_payload("complete"))
        .await
        .unwrap();

    assert_eq!(detail.status, OrderStatus::Complete);
    // the returned view already reflects the release
    let embedded = detail.table.unwrap();
    assert_eq!(embedded.status, TableStatus::Available);
    assert!(embedded.current_order.is_none());

    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.current_order.is_none());
}

#[tokio::test]
async fn test_other_statuses_leave_table_unchanged() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "3", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();
    let before = load_table(&db, &table.id).await;

    for status in ["preparing", "served", "pending", "cancelled"] {
        manager
            .update_order_status(&order.id, status_payload(status))
            .await
            .unwrap();
        let after = load_table(&db, &table.id).await;
        assert_eq!(after, before, "status {status} must not touch the table");
    }
}

#[tokio::test]
async fn test_cancelled_keeps_table_occupied() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "4", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    manager
        .update_order_status(&order.id, status_payload("cancelled"))
        .await
        .unwrap();

    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.current_order.as_deref(), Some(order.id.as_str()));
}

#[tokio::test]
async fn test_delete_releases_table_regardless_of_status() {
    for status in ["pending", "preparing", "served", "cancelled"] {
        let (manager, db) = create_test_manager().await;
        let table = seed_table(&db, "5", 4).await;
        let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
        let order = manager
            .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
            .await
            .unwrap();
        manager
            .update_order_status(&order.id, status_payload(status))
            .await
            .unwrap();

        let deleted = manager.delete_order(&order.id).await.unwrap();
        assert_eq!(deleted.id, order.id);

        assert!(matches!(
            manager.get_order(&order.id).await.unwrap_err(),
            ManagerError::OrderNotFound(_)
        ));
        let table = load_table(&db, &table.id).await;
        assert_eq!(table.status, TableStatus::Available, "after {status}");
        assert!(table.current_order.is_none());
    }
}

#[tokio::test]
async fn test_delete_unknown_order() {
    let (manager, _db) = create_test_manager().await;
    let err = manager.delete_order("orders:missing").await.unwrap_err();
    assert!(matches!(err, ManagerError::OrderNotFound(_)));
}

#[tokio::test]
async fn test_delete_with_missing_table_still_succeeds() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "6", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();
    DiningTableRepository::new(db.clone())
        .delete(&table.id)
        .await
        .unwrap();

    manager.delete_order(&order.id).await.unwrap();
    assert!(manager.get_all_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_with_missing_table_still_succeeds() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "7", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();
    DiningTableRepository::new(db.clone())
        .delete(&table.id)
        .await
        .unwrap();

    let detail = manager
        .update_order_status(&order.id, status_payload("complete"))
        .await
        .unwrap();
    assert_eq!(detail.status, OrderStatus::Complete);
    assert!(detail.table.is_none());
}

// ========================================================================
// End-to-end scenarios
// ========================================================================

#[tokio::test]
async fn test_scenario_create_prepare_complete() {
    let (manager, db) = create_test_manager().await;
    let t1 = seed_table(&db, "T1", 4).await;
    assert_eq!(t1.status, TableStatus::Available);
    let i1 = seed_menu_item(&db, "Pasta", 10.0, true).await;

    let o1 = manager
        .create_order(create_payload(&t1.id, vec![line(&i1.id, 2, 10.0)], 20.0))
        .await
        .unwrap();
    assert_eq!(o1.status, OrderStatus::Pending);
    let t1_now = load_table(&db, &t1.id).await;
    assert_eq!(t1_now.status, TableStatus::Occupied);
    assert_eq!(t1_now.current_order.as_deref(), Some(o1.id.as_str()));

    manager
        .update_order_status(&o1.id, status_payload("preparing"))
        .await
        .unwrap();
    assert_eq!(load_table(&db, &t1.id).await.status, TableStatus::Occupied);

    manager
        .update_order_status(&o1.id, status_payload("complete"))
        .await
        .unwrap();
    let t1_now = load_table(&db, &t1.id).await;
    assert_eq!(t1_now.status, TableStatus::Available);
    assert!(t1_now.current_order.is_none());
}

#[tokio::test]
async fn test_scenario_create_then_delete() {
    let (manager, db) = create_test_manager().await;
    let t2 = seed_table(&db, "T2", 2).await;
    let salad = seed_menu_item(&db, "Salad", 7.5, true).await;

    let order = manager
        .create_order(create_payload(&t2.id, vec![line(&salad.id, 2, 7.5)], 15.0))
        .await
        .unwrap();
    assert_eq!(load_table(&db, &t2.id).await.status, TableStatus::Occupied);

    manager.delete_order(&order.id).await.unwrap();

    let t2_now = load_table(&db, &t2.id).await;
    assert_eq!(t2_now.status, TableStatus::Available);
    assert!(t2_now.current_order.is_none());
}

#[tokio::test]
async fn test_second_order_on_table_overwrites_current_order() {
    let (manager, db) = create_test_manager().await;
    let table = seed_table(&db, "8", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let first = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();
    let second = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    // no conflict detection: last writer wins
    let table_now = load_table(&db, &table.id).await;
    assert_eq!(table_now.current_order.as_deref(), Some(second.id.as_str()));

    // completing the older order still frees the table
    manager
        .update_order_status(&first.id, status_payload("complete"))
        .await
        .unwrap();
    let table_now = load_table(&db, &table.id).await;
    assert_eq!(table_now.status, TableStatus::Available);
    assert!(table_now.current_order.is_none());
}

// ========================================================================
// Non-atomic two-step writes
// ========================================================================

#[tokio::test]
async fn test_create_table_write_failure_leaves_order_persisted() {
    let db = test_db().await;
    let manager = manager_with_flaky_tables(&db, true, false);
    let table = seed_table(&db, "9", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;

    let err = manager
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::Storage(_)));

    // the order write already happened and is not rolled back
    let orders = manager.get_orders_by_table(&table.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Pending);

    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Available);
    assert!(table.current_order.is_none());
}

#[tokio::test]
async fn test_complete_table_write_failure_keeps_new_status() {
    let db = test_db().await;
    let table = seed_table(&db, "10", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = OrdersManager::new(db.clone())
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    let flaky = manager_with_flaky_tables(&db, false, true);
    let err = flaky
        .update_order_status(&order.id, status_payload("complete"))
        .await
        .unwrap_err();
    assert!(matches!(err, ManagerError::Storage(_)));

    let detail = flaky.get_order(&order.id).await.unwrap();
    assert_eq!(detail.status, OrderStatus::Complete);
    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.current_order.as_deref(), Some(order.id.as_str()));
}

#[tokio::test]
async fn test_delete_table_write_failure_is_swallowed() {
    let db = test_db().await;
    let table = seed_table(&db, "11", 4).await;
    let burger = seed_menu_item(&db, "Burger", 10.0, true).await;
    let order = OrdersManager::new(db.clone())
        .create_order(create_payload(&table.id, vec![line(&burger.id, 1, 10.0)], 10.0))
        .await
        .unwrap();

    let flaky = manager_with_flaky_tables(&db, false, true);
    flaky.delete_order(&order.id).await.unwrap();

    assert!(flaky.get_all_orders().await.unwrap().is_empty());
    // table keeps pointing at the deleted order
    let table = load_table(&db, &table.id).await;
    assert_eq!(table.status, TableStatus::Occupied);
    assert_eq!(table.current_order.as_deref(), Some(order.id.as_str()));
}
