use super::*;

#[tokio::test]
async fn test_update_replaces_items_and_reprices() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1)]).await;
    assert_eq!(order.total_price, dec!(12));

    let outcome = service
        .update_and_reprice(order.id, None, &[line(ITEM_B, 3), line(ITEM_C, 2)], march(2))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RepriceOutcome {
            order_id: order.id,
            subtotal: dec!(21),
            final_price: dec!(21),
        }
    );

    let items = store.items(order.id);
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.item_id != ITEM_A));

    let updated = store.order(order.id);
    assert_eq!(updated.total_price, dec!(21));
    assert_eq!(updated.final_price, dec!(21));
    assert_eq!(updated.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_update_uses_current_catalog_price() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1)]).await;
    store.set_item(ITEM_A, dec!(15.00));

    let outcome = service
        .update_and_reprice(order.id, None, &[line(ITEM_A, 2)], march(2))
        .await
        .unwrap();

    assert_eq!(outcome.subtotal, dec!(30));
    assert_eq!(store.items(order.id)[0].price, dec!(15.00));
}

#[tokio::test]
async fn test_update_recomputes_discounts() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1)]).await;

    let outcome = service
        .update_and_reprice(order.id, None, &[line(ITEM_A, 10), line(ITEM_B, 5)], december(20))
        .await
        .unwrap();

    // 130 - 19.5 seasonal - 12 volume
    assert_eq!(outcome.subtotal, dec!(130));
    assert_eq!(outcome.final_price, dec!(98.5));
    assert!(store.order(order.id).final_price <= store.order(order.id).total_price);
}

#[tokio::test]
async fn test_update_loyalty_excludes_the_order_itself() {
    let (store, service) = setup();
    store.seed_orders(USER, 4);
    let order = create(&service, &[line(ITEM_C, 1)]).await;

    // Five live orders including this one: four prior
    let outcome = service
        .update_and_reprice(order.id, None, &[line(ITEM_C, 2)], march(2))
        .await
        .unwrap();
    assert_eq!(outcome.final_price, dec!(15));

    store.seed_orders(USER, 1);
    let outcome = service
        .update_and_reprice(order.id, None, &[line(ITEM_C, 2)], march(2))
        .await
        .unwrap();
    assert_eq!(outcome.final_price, dec!(14.25));
}

#[tokio::test]
async fn test_update_changes_status_when_different() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1)]).await;

    service
        .update_and_reprice(order.id, Some(OrderStatus::Confirm), &[line(ITEM_A, 1)], march(2))
        .await
        .unwrap();
    assert_eq!(store.order(order.id).status, OrderStatus::Confirm);

    // Same status is a no-op
    service
        .update_and_reprice(order.id, Some(OrderStatus::Confirm), &[line(ITEM_A, 1)], march(2))
        .await
        .unwrap();
    assert_eq!(store.order(order.id).status, OrderStatus::Confirm);
}

#[tokio::test]
async fn test_update_with_empty_item_set() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 3)]).await;

    let outcome = service
        .update_and_reprice(order.id, None, &[], march(2))
        .await
        .unwrap();

    assert_eq!(outcome.subtotal, Decimal::ZERO);
    assert_eq!(outcome.final_price, Decimal::ZERO);
    assert!(store.items(order.id).is_empty());
}

// ========================================================================
// All-or-nothing
// ========================================================================

#[tokio::test]
async fn test_invalid_item_leaves_order_unchanged() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1), line(ITEM_B, 2)]).await;
    let items_before = store.items(order.id);

    let err = service
        .update_and_reprice(
            order.id,
            Some(OrderStatus::Confirm),
            &[line(ITEM_C, 1), line(999, 1), line(ITEM_A, 4)],
            march(2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidItem(999)));
    assert_eq!(store.items(order.id), items_before);
    let after = store.order(order.id);
    assert_eq!(after.total_price, dec!(16));
    assert_eq!(after.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_update_commit_failure_rolls_back() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1)]).await;
    store.fail_next_commits(true);

    let err = service
        .update_and_reprice(order.id, None, &[line(ITEM_B, 1)], march(2))
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::TransactionFailed(_)));
    assert_eq!(store.items(order.id)[0].item_id, ITEM_A);
    assert_eq!(store.order(order.id).total_price, dec!(12));
}

#[tokio::test]
async fn test_update_missing_or_cancelled_order() {
    let (_store, service) = setup();
    let err = service
        .update_and_reprice(55, None, &[line(ITEM_A, 1)], march(2))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(55)));

    let order = create(&service, &[line(ITEM_A, 1)]).await;
    service.cancel_order(order.id).await.unwrap();
    let err = service
        .update_and_reprice(order.id, None, &[line(ITEM_A, 1)], march(2))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::OrderNotFound(_)));
}

#[tokio::test]
async fn test_update_rejects_non_positive_quantity() {
    let (store, service) = setup();
    let order = create(&service, &[line(ITEM_A, 1)]).await;

    let err = service
        .update_and_reprice(order.id, None, &[line(ITEM_A, -1)], march(2))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidQuantity { .. }));
    assert_eq!(store.items(order.id).len(), 1);
}
