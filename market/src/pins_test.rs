use chrono::{TimeDelta, TimeZone, Utc};

use super::*;
use crate::model::Role;
use crate::store::MemoryStore;
use crate::testing::{TestClock, listing};

const KEY: &str = "products";

fn admin() -> Actor {
    Actor::new("sohaum", Role::Admin)
}

fn member() -> Actor {
    Actor::new("sneha", Role::User)
}

fn policy<'a>(store: &'a MemoryStore, clock: &'a TestClock, limit: PinLimit) -> PinPolicy<'a, MemoryStore, TestClock> {
    PinPolicy::new(ListingRepository::new(store, clock, KEY), clock, limit)
}

fn seed(store: &MemoryStore, clock: &TestClock, titles: &[&str]) -> Vec<String> {
    let repo = ListingRepository::new(store, clock, KEY);
    titles.iter().map(|t| repo.add(listing(t, "sneha", 100)).expect("add").id).collect()
}

// =============================================================
// Permission
// =============================================================

#[test]
fn only_admins_can_pin() {
    assert!(can_pin(Some(&admin())));
    assert!(!can_pin(Some(&member())));
    assert!(!can_pin(None));
}

#[test]
fn non_admin_pin_changes_nothing() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A"]);
    let before = ListingRepository::new(&store, &clock, KEY).get_all();

    let err = policy(&store, &clock, PinLimit::Unlimited).pin(&ids[0], Some(&member())).expect_err("denied");
    assert!(matches!(err, PinError::NotAdmin));
    let err = policy(&store, &clock, PinLimit::Unlimited).pin(&ids[0], None).expect_err("denied");
    assert!(matches!(err, PinError::NotAdmin));

    assert_eq!(ListingRepository::new(&store, &clock, KEY).get_all(), before);
}

#[test]
fn non_admin_unpin_is_denied() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A"]);
    let pins = policy(&store, &clock, PinLimit::Unlimited);
    pins.pin(&ids[0], Some(&admin())).expect("pin");

    let err = pins.unpin(&ids[0], Some(&member())).expect_err("denied");
    assert!(matches!(err, PinError::NotAdmin));
    assert_eq!(pins.pinned().len(), 1);
}

// =============================================================
// Pin / unpin
// =============================================================

#[test]
fn pin_sets_flag_and_timestamp() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A"]);

    let outcome = policy(&store, &clock, PinLimit::default()).pin(&ids[0], Some(&admin())).expect("pin");

    assert_eq!(outcome, PinOutcome::Pinned);
    let stored = ListingRepository::new(&store, &clock, KEY).get(&ids[0]).expect("present");
    assert!(stored.pinned);
    assert!(stored.pinned_at.is_some());
}

#[test]
fn unpin_clears_flag_and_timestamp() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A"]);
    let pins = policy(&store, &clock, PinLimit::default());
    pins.pin(&ids[0], Some(&admin())).expect("pin");

    assert_eq!(pins.unpin(&ids[0], Some(&admin())).expect("unpin"), PinOutcome::Unpinned);

    let stored = ListingRepository::new(&store, &clock, KEY).get(&ids[0]).expect("present");
    assert!(!stored.pinned);
    assert_eq!(stored.pinned_at, None);
}

#[test]
fn pin_missing_listing_is_silent_noop() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let pins = policy(&store, &clock, PinLimit::default());
    assert_eq!(pins.pin("p-missing", Some(&admin())).expect("pin"), PinOutcome::Missing);
    assert_eq!(pins.unpin("p-missing", Some(&admin())).expect("unpin"), PinOutcome::Missing);
    assert_eq!(store.get_item(KEY).expect("get"), None);
}

#[test]
fn toggle_flips_pin_state() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A"]);
    let pins = policy(&store, &clock, PinLimit::default());

    assert_eq!(pins.toggle(&ids[0], Some(&admin())).expect("toggle on"), PinOutcome::Pinned);
    assert_eq!(pins.toggle(&ids[0], Some(&admin())).expect("toggle off"), PinOutcome::Unpinned);
    assert!(pins.pinned().is_empty());
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn later_pin_sorts_first_and_pins_precede_unpinned() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A", "B"]);
    clock.advance(3_600);
    let newest = seed(&store, &clock, &["Newest unpinned"]);
    let pins = policy(&store, &clock, PinLimit::Unlimited);

    pins.pin(&ids[0], Some(&admin())).expect("pin A");
    pins.pin(&ids[1], Some(&admin())).expect("pin B");

    let hero: Vec<String> = pins.hero().into_iter().map(|l| l.title).collect();
    assert_eq!(hero, ["B", "A"]);

    let repo = ListingRepository::new(&store, &clock, KEY);
    let mut all = repo.get_active();
    sort_featured(&mut all, today(&clock));
    let ordered: Vec<&str> = all.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ordered, [ids[1].as_str(), ids[0].as_str(), newest[0].as_str()]);
}

#[test]
fn equal_pin_times_fall_back_to_newest_created_and_are_stable() {
    let pinned_at = Utc.with_ymd_and_hms(2026, 3, 9, 8, 0, 0).single();
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single().expect("ts");
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).expect("date");
    let make = |id: &str, age_days: i64| Listing {
        id: id.to_owned(),
        pinned: true,
        pinned_at,
        created_at: Some(created + TimeDelta::days(age_days)),
        ..Listing::default()
    };
    let listings = vec![make("older", 0), make("newer", 2), make("twin-a", 1), make("twin-b", 1)];

    let mut first = listings.clone();
    sort_featured(&mut first, today);
    let mut second = listings;
    sort_featured(&mut second, today);

    let ids: Vec<&str> = first.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["newer", "twin-a", "twin-b", "older"]);
    assert_eq!(first, second);
}

#[test]
fn expired_pinned_listing_sorts_with_unpinned() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).expect("date");
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single().expect("ts");
    let stale = Listing {
        id: "stale".to_owned(),
        pinned: true,
        pinned_at: Some(created),
        expiry_date: today.pred_opt(),
        created_at: Some(created + TimeDelta::days(5)),
        ..Listing::default()
    };
    let fresh = Listing { id: "fresh".to_owned(), created_at: Some(created + TimeDelta::days(1)), ..Listing::default() };
    assert_eq!(compare_featured(&stale, &fresh, today), Ordering::Less);
    assert!(!stale.is_featured(today));
}

// =============================================================
// Cap and replace flow
// =============================================================

#[test]
fn cap_rejects_extra_pin_with_current_pins() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A", "B", "C"]);
    let pins = policy(&store, &clock, PinLimit::Capped(2));
    pins.pin(&ids[0], Some(&admin())).expect("pin A");
    pins.pin(&ids[1], Some(&admin())).expect("pin B");

    let err = pins.pin(&ids[2], Some(&admin())).expect_err("cap reached");
    let PinError::LimitReached { limit, pinned } = &err else {
        panic!("expected LimitReached, got {err:?}");
    };
    assert_eq!(*limit, 2);
    assert_eq!(pinned.len(), 2);
    assert_eq!(err.notice(), "❌ You can only pin up to 2 listings.");
    assert!(!ListingRepository::new(&store, &clock, KEY).get(&ids[2]).expect("C").pinned);
}

#[test]
fn repinning_at_cap_refreshes_without_rejection() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A", "B"]);
    let pins = policy(&store, &clock, PinLimit::Capped(2));
    pins.pin(&ids[0], Some(&admin())).expect("pin A");
    pins.pin(&ids[1], Some(&admin())).expect("pin B");

    pins.pin(&ids[0], Some(&admin())).expect("re-pin A");

    let order: Vec<String> = pins.hero().into_iter().map(|l| l.title).collect();
    assert_eq!(order, ["A", "B"]);
}

#[test]
fn expired_pin_frees_a_slot() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let repo = ListingRepository::new(&store, &clock, KEY);
    let yesterday = today(&clock).pred_opt();
    let stale = repo
        .add(Listing { pinned: true, pinned_at: Some(clock.utc()), expiry_date: yesterday, ..listing("Stale", "sneha", 1) })
        .expect("add");
    let ids = seed(&store, &clock, &["Fresh"]);
    let pins = policy(&store, &clock, PinLimit::Capped(1));

    assert_eq!(pins.pin(&ids[0], Some(&admin())).expect("pin"), PinOutcome::Pinned);
    assert!(pins.pinned().iter().all(|l| l.id != stale.id));
}

#[test]
fn replace_swaps_pins_in_one_step() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A", "B", "C"]);
    let pins = policy(&store, &clock, PinLimit::Capped(2));
    pins.pin(&ids[0], Some(&admin())).expect("pin A");
    pins.pin(&ids[1], Some(&admin())).expect("pin B");

    let outcome = pins.pin_replacing(&ids[2], &ids[0], Some(&admin())).expect("replace");

    assert_eq!(outcome, PinOutcome::Pinned);
    let hero: Vec<String> = pins.hero().into_iter().map(|l| l.title).collect();
    assert_eq!(hero, ["C", "B"]);
}

#[test]
fn replace_requires_admin() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A", "B"]);
    let err = policy(&store, &clock, PinLimit::Capped(1)).pin_replacing(&ids[1], &ids[0], Some(&member()));
    assert!(matches!(err, Err(PinError::NotAdmin)));
}

#[test]
fn replace_with_unknown_target_changes_nothing() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let ids = seed(&store, &clock, &["A"]);
    let pins = policy(&store, &clock, PinLimit::Capped(1));
    pins.pin(&ids[0], Some(&admin())).expect("pin A");

    let outcome = pins.pin_replacing("p-missing", &ids[0], Some(&admin())).expect("replace");

    assert_eq!(outcome, PinOutcome::Missing);
    assert_eq!(pins.pinned().len(), 1);
}

#[test]
fn hero_truncates_to_cap() {
    let store = MemoryStore::new();
    let clock = TestClock::default();
    let repo = ListingRepository::new(&store, &clock, KEY);
    for title in ["A", "B", "C"] {
        repo.add(Listing { pinned: true, pinned_at: Some(clock.utc()), ..listing(title, "sneha", 1) }).expect("add");
    }
    assert_eq!(policy(&store, &clock, PinLimit::Capped(2)).hero().len(), 2);
    assert_eq!(policy(&store, &clock, PinLimit::Unlimited).hero().len(), 3);
}
