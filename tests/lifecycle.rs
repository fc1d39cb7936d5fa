//! Pickup lifecycle tests at the service layer
//!
//! Exercises the lifecycle engine over in-memory repositories, including
//! racing acceptances and the ordering of every collector and customer listing.

use std::sync::Arc;

use ecocycle_api::config::AppConfig;
use ecocycle_api::domain::pickup::{PickupStatus, WasteItem};
use ecocycle_api::domain::user::{MobileNumber, NewUser, Role, Username};
use ecocycle_api::domain::DomainError;
use ecocycle_api::infrastructure::repositories::{InMemoryPickupRepository, InMemoryUserRepository};
use ecocycle_api::services::{IdentityService, PickupService, SubmitPickup};
use uuid::Uuid;

struct Fixture {
    identity: IdentityService,
    pickups: Arc<PickupService>,
}

fn setup() -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let pickups = Arc::new(InMemoryPickupRepository::new());

    Fixture {
        identity: IdentityService::new(users.clone(), AppConfig::for_tests().auth),
        pickups: Arc::new(PickupService::new(pickups, users)),
    }
}

impl Fixture {
    async fn user(&self, name: &str, mobile: &str, role: Role) -> Uuid {
        self.identity
            .register(NewUser {
                username: Username::new(name).unwrap(),
                mobile_number: MobileNumber::new(mobile).unwrap(),
                password: "password123".to_string(),
                role,
                address: None,
                vehicle_details: None,
                service_area: None,
            })
            .await
            .expect("register user")
            .id
    }

    async fn submit(&self, customer: Uuid, address: &str) -> Uuid {
        self.pickups
            .submit(
                customer,
                SubmitPickup {
                    waste_items: vec![WasteItem::new("Plastic", 5.0).unwrap()],
                    total_value: 125.0,
                    pickup_address: address.to_string(),
                },
            )
            .await
            .expect("submit pickup")
            .pickup
            .id()
    }
}

#[tokio::test]
async fn test_submit_creates_pending_pickup() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;

    let id = fx.submit(customer, "12 Elm St").await;
    let view = fx.pickups.view(customer, id).await.unwrap();

    assert_eq!(view.pickup.status(), PickupStatus::Pending);
    assert!(view.pickup.collector().is_none());
    assert!(view.pickup.completion_time().is_none());
    assert_eq!(view.pickup.pickup_address(), "12 Elm St");
    assert_eq!(view.customer.username, "customer_c");
    assert!(view.collector.is_none());
}

#[tokio::test]
async fn test_submit_rejected_for_collector() {
    let fx = setup();
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;

    let err = fx
        .pickups
        .submit(
            collector,
            SubmitPickup {
                waste_items: vec![WasteItem::new("Glass", 1.0).unwrap()],
                total_value: 10.0,
                pickup_address: "12 Elm St".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn test_complete_sets_completion_time() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;
    let id = fx.submit(customer, "12 Elm St").await;

    fx.pickups.accept(collector, id).await.unwrap();
    let view = fx.pickups.complete(collector, id).await.unwrap();

    let pickup = &view.pickup;
    assert_eq!(pickup.status(), PickupStatus::Completed);
    assert_eq!(pickup.collector(), Some(collector));
    let completed_at = pickup.completion_time().expect("completion time");
    assert!(completed_at >= pickup.created_at());
    assert!(pickup.updated_at() >= pickup.created_at());

    // Both parties get each other's contact details on a single view
    assert_eq!(view.customer.mobile_number.as_deref(), Some("9000000001"));
    assert_eq!(
        view.collector.as_ref().and_then(|c| c.mobile_number.as_deref()),
        Some("9000000002")
    );
}

#[tokio::test]
async fn test_terminal_pickups_reject_further_transitions() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;
    let completed = fx.submit(customer, "1 Elm St").await;
    let cancelled = fx.submit(customer, "2 Elm St").await;

    fx.pickups.accept(collector, completed).await.unwrap();
    fx.pickups.complete(collector, completed).await.unwrap();
    fx.pickups.accept(collector, cancelled).await.unwrap();
    fx.pickups.cancel(collector, cancelled).await.unwrap();

    for id in [completed, cancelled] {
        assert!(matches!(
            fx.pickups.complete(collector, id).await,
            Err(DomainError::InvalidState(_))
        ));
        assert!(matches!(
            fx.pickups.cancel(collector, id).await,
            Err(DomainError::InvalidState(_))
        ));
        assert!(matches!(
            fx.pickups.accept(collector, id).await,
            Err(DomainError::InvalidState(_))
        ));
    }
}

#[tokio::test]
async fn test_unknown_pickup_is_not_found() {
    let fx = setup();
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;

    let err = fx.pickups.accept(collector, Uuid::new_v4()).await.unwrap_err();

    assert_eq!(err, DomainError::NotFound("Pickup request not found".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_accept_has_single_winner() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let id = fx.submit(customer, "12 Elm St").await;

    let mut collectors = Vec::new();
    for n in 0..8 {
        let mobile = format!("90000001{:02}", n);
        collectors.push(fx.user(&format!("collector_{}", n), &mobile, Role::Collector).await);
    }

    let handles: Vec<_> = collectors
        .iter()
        .map(|&collector| {
            let pickups = fx.pickups.clone();
            tokio::spawn(async move { (collector, pickups.accept(collector, id).await) })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        let (collector, result) = handle.await.unwrap();
        match result {
            Ok(_) => winners.push(collector),
            Err(err) => assert!(matches!(err, DomainError::InvalidState(_)), "{:?}", err),
        }
    }

    assert_eq!(winners.len(), 1);
    let view = fx.pickups.view(customer, id).await.unwrap();
    assert_eq!(view.pickup.status(), PickupStatus::Accepted);
    assert_eq!(view.pickup.collector(), Some(winners[0]));
}

#[tokio::test]
async fn test_racing_pair_of_accepts() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let x = fx.user("collector_x", "9000000002", Role::Collector).await;
    let y = fx.user("collector_y", "9000000003", Role::Collector).await;
    let id = fx.submit(customer, "12 Elm St").await;

    let (a, b) = tokio::join!(fx.pickups.accept(x, id), fx.pickups.accept(y, id));

    assert!(a.is_ok() != b.is_ok(), "exactly one accept must win");
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser, Err(DomainError::InvalidState(_))));
}

#[tokio::test]
async fn test_available_listing_excludes_claimed_pickups() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;
    let first = fx.submit(customer, "1 Elm St").await;
    let second = fx.submit(customer, "2 Elm St").await;
    let third = fx.submit(customer, "3 Elm St").await;

    fx.pickups.accept(collector, second).await.unwrap();

    let available = fx.pickups.list_available(collector).await.unwrap();
    let ids: Vec<Uuid> = available.iter().map(|v| v.pickup.id()).collect();
    assert_eq!(ids, vec![third, first]);

    // Listings show names only
    assert!(available.iter().all(|v| v.customer.mobile_number.is_none()));
}

#[tokio::test]
async fn test_active_listing_oldest_first_with_customer_contact() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let x = fx.user("collector_x", "9000000002", Role::Collector).await;
    let y = fx.user("collector_y", "9000000003", Role::Collector).await;
    let older = fx.submit(customer, "1 Elm St").await;
    let newer = fx.submit(customer, "2 Elm St").await;
    let other = fx.submit(customer, "3 Elm St").await;

    fx.pickups.accept(x, newer).await.unwrap();
    fx.pickups.accept(x, older).await.unwrap();
    fx.pickups.accept(y, other).await.unwrap();

    let active = fx.pickups.list_active_for_collector(x).await.unwrap();
    let ids: Vec<Uuid> = active.iter().map(|v| v.pickup.id()).collect();
    assert_eq!(ids, vec![older, newer]);
    assert!(active
        .iter()
        .all(|v| v.customer.mobile_number.as_deref() == Some("9000000001")));
}

#[tokio::test]
async fn test_history_listing_most_recently_updated_first() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;
    let first = fx.submit(customer, "1 Elm St").await;
    let second = fx.submit(customer, "2 Elm St").await;
    let still_active = fx.submit(customer, "3 Elm St").await;

    fx.pickups.accept(collector, first).await.unwrap();
    fx.pickups.accept(collector, second).await.unwrap();
    fx.pickups.accept(collector, still_active).await.unwrap();
    fx.pickups.complete(collector, first).await.unwrap();
    fx.pickups.cancel(collector, second).await.unwrap();

    let history = fx.pickups.list_history_for_collector(collector).await.unwrap();
    let entries: Vec<(Uuid, PickupStatus)> = history
        .iter()
        .map(|v| (v.pickup.id(), v.pickup.status()))
        .collect();

    assert_eq!(
        entries,
        vec![
            (second, PickupStatus::Cancelled),
            (first, PickupStatus::Completed)
        ]
    );
}

#[tokio::test]
async fn test_customer_listing_is_scoped_to_owner() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let neighbour = fx.user("customer_d", "9000000004", Role::Customer).await;
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;
    let older = fx.submit(customer, "1 Elm St").await;
    let newer = fx.submit(customer, "2 Elm St").await;
    fx.submit(neighbour, "9 Oak Ave").await;

    fx.pickups.accept(collector, older).await.unwrap();

    let mine = fx.pickups.list_for_customer(customer).await.unwrap();
    let ids: Vec<Uuid> = mine.iter().map(|v| v.pickup.id()).collect();
    assert_eq!(ids, vec![newer, older]);
    assert_eq!(
        mine[1].collector.as_ref().map(|c| c.username.as_str()),
        Some("collector_x")
    );
}

#[tokio::test]
async fn test_view_is_limited_to_parties() {
    let fx = setup();
    let customer = fx.user("customer_c", "9000000001", Role::Customer).await;
    let stranger = fx.user("customer_d", "9000000004", Role::Customer).await;
    let collector = fx.user("collector_x", "9000000002", Role::Collector).await;
    let id = fx.submit(customer, "12 Elm St").await;

    assert!(matches!(
        fx.pickups.view(collector, id).await,
        Err(DomainError::Forbidden(_))
    ));

    fx.pickups.accept(collector, id).await.unwrap();

    assert!(fx.pickups.view(collector, id).await.is_ok());
    assert!(matches!(
        fx.pickups.view(stranger, id).await,
        Err(DomainError::Forbidden(_))
    ));
}
