//! End-to-end table closing flow against a fully initialized server state
//!
//! Drives the service graph the way handlers do: create orders through the
//! store, advance them through the lifecycle, then settle the table through
//! the closer.

use comanda_server::orders::closing::CloseError;
use comanda_server::{Config, ServerState};
use shared::order::{
    CloseTableRequest, CreateOrderRequest, CustomerInfo, Order, OrderItemInput, OrderKind,
    OrderStatus,
};

const RESTAURANT: &str = "rest-1";
const TABLE: &str = "table-5";

fn customer(name: &str) -> CustomerInfo {
    CustomerInfo {
        name: name.to_string(),
        phone: Some("+351 900 000 000".to_string()),
        address: None,
    }
}

fn item(product_id: &str, name: &str, unit_price: f64, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        product_id: product_id.to_string(),
        name: name.to_string(),
        unit_price,
        quantity,
        note: None,
    }
}

fn table_order(customer_name: &str, items: Vec<OrderItemInput>) -> CreateOrderRequest {
    CreateOrderRequest {
        restaurant_id: RESTAURANT.to_string(),
        kind: OrderKind::Table,
        table_id: Some(TABLE.to_string()),
        customer: customer(customer_name),
        items,
        delivery_fee: 0.0,
        coupon_discount: 0.0,
        note: None,
    }
}

async fn seed_table(state: &ServerState) -> Vec<Order> {
    // Two rounds from two customers at the same table. Burger is ordered at
    // the same price in both rounds so the bill merges the lines.
    let first = state
        .store
        .create_order(table_order(
            "Alice",
            vec![item("p-burger", "Burger", 20.0, 2), item("p-soda", "Soda", 8.0, 1)],
        ))
        .await
        .unwrap();

    let second = state
        .store
        .create_order(table_order("Bob", vec![item("p-burger", "Burger", 20.0, 1)]))
        .await
        .unwrap();

    for order in [&first, &second] {
        state
            .lifecycle
            .transition(&order.id, OrderStatus::Confirmed, None)
            .await
            .unwrap();
    }

    vec![first, second]
}

#[tokio::test]
async fn test_full_close_flow_with_tip_and_split() {
    let state = ServerState::initialize(&Config::default());
    let orders = seed_table(&state).await;

    // Preview matches what the close will settle.
    let preview = state
        .consolidator
        .consolidate(RESTAURANT, TABLE, None)
        .await
        .unwrap();
    assert_eq!(preview.subtotal, 68.0);
    assert_eq!(preview.lines.len(), 2);

    let burger = preview
        .lines
        .iter()
        .find(|l| l.product_id == "p-burger")
        .unwrap();
    assert_eq!(burger.quantity, 3);
    assert_eq!(burger.line_total, 60.0);

    let response = state
        .closer
        .close_table(
            TABLE,
            CloseTableRequest {
                restaurant_id: RESTAURANT.to_string(),
                tip_enabled: true,
                tip_percent: 10.0,
                split_bill: true,
                number_of_people: 4,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(response.amounts.subtotal, 68.0);
    assert_eq!(response.amounts.tip_amount, 6.8);
    assert_eq!(response.amounts.total, 74.8);
    assert_eq!(response.amounts.per_person, 18.7);
    assert_eq!(response.closed_count, 2);

    // Every order on the table ended up delivered.
    for order in &orders {
        let stored = state.store.get_order(&order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
        assert!(stored.delivered_at.is_some());
    }

    // Closing again finds nothing: the close is not repeatable.
    let again = state
        .closer
        .close_table(
            TABLE,
            CloseTableRequest {
                restaurant_id: RESTAURANT.to_string(),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(again, Err(CloseError::NothingToClose(_))));
}

#[tokio::test]
async fn test_close_by_user_leaves_other_customers_open() {
    let state = ServerState::initialize(&Config::default());
    let orders = seed_table(&state).await;

    let response = state
        .closer
        .close_table(
            TABLE,
            CloseTableRequest {
                restaurant_id: RESTAURANT.to_string(),
                close_by_user: true,
                selected_user: Some("Alice".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Only Alice's order settled: Burger x2 + Soda.
    assert_eq!(response.closed_count, 1);
    assert_eq!(response.amounts.subtotal, 48.0);

    let bob = state.store.get_order(&orders[1].id).await.unwrap();
    assert_eq!(bob.status, OrderStatus::Confirmed);

    // Bob can still be closed afterwards.
    let rest = state
        .closer
        .close_table(
            TABLE,
            CloseTableRequest {
                restaurant_id: RESTAURANT.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(rest.closed_count, 1);
    assert_eq!(rest.amounts.subtotal, 20.0);
}

#[tokio::test]
async fn test_concurrent_closes_settle_the_table_once() {
    let state = ServerState::initialize(&Config::default());
    seed_table(&state).await;

    let req_a = CloseTableRequest {
        restaurant_id: RESTAURANT.to_string(),
        ..Default::default()
    };
    let req_b = req_a.clone();

    let a = state.closer.clone();
    let b = state.closer.clone();
    let (ra, rb) = tokio::join!(
        async move { a.close_table(TABLE, req_a).await },
        async move { b.close_table(TABLE, req_b).await },
    );

    // Exactly one close wins; the loser either timed out on the lock or found
    // an already-empty table.
    let successes = [&ra, &rb].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let winner = if ra.is_ok() { ra.unwrap() } else { rb.unwrap() };
    assert_eq!(winner.closed_count, 2);
    assert_eq!(winner.amounts.subtotal, 68.0);
}

#[tokio::test]
async fn test_cancelled_order_never_reaches_the_bill() {
    let state = ServerState::initialize(&Config::default());
    let orders = seed_table(&state).await;

    state
        .lifecycle
        .transition(
            &orders[1].id,
            OrderStatus::Cancelled,
            Some("customer left".to_string()),
        )
        .await
        .unwrap();

    let bill = state
        .consolidator
        .consolidate(RESTAURANT, TABLE, None)
        .await
        .unwrap();
    assert_eq!(bill.subtotal, 48.0);
    assert_eq!(bill.source_order_ids.len(), 1);
}
