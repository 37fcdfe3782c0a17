use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

// =============================================================
// Active rule
// =============================================================

#[test]
fn listing_without_expiry_is_always_active() {
    let listing = Listing { title: "Lamp".to_owned(), ..Listing::default() };
    assert!(listing.is_active(day(2030, 1, 1)));
}

#[test]
fn listing_expiring_today_is_still_active() {
    let listing = Listing { expiry_date: Some(day(2026, 3, 10)), ..Listing::default() };
    assert!(listing.is_active(day(2026, 3, 10)));
    assert!(listing.is_active(day(2026, 3, 9)));
}

#[test]
fn listing_expired_yesterday_is_inactive() {
    let listing = Listing { expiry_date: Some(day(2026, 3, 9)), ..Listing::default() };
    assert!(!listing.is_active(day(2026, 3, 10)));
}

#[test]
fn expired_pinned_listing_is_not_featured() {
    let listing = Listing { pinned: true, expiry_date: Some(day(2026, 3, 1)), ..Listing::default() };
    assert!(!listing.is_featured(day(2026, 3, 10)));
    assert!(listing.is_featured(day(2026, 3, 1)));
}

#[test]
fn empty_seller_owns_nothing() {
    let listing = Listing::default();
    assert!(!listing.is_owned_by(""));
}

// =============================================================
// Patch
// =============================================================

#[test]
fn patch_merges_only_present_fields() {
    let mut listing = Listing {
        id: "p-1".to_owned(),
        title: "Old".to_owned(),
        price: 500,
        contact: "9800000000".to_owned(),
        ..Listing::default()
    };
    let patch = ListingPatch { title: Some("New".to_owned()), price: Some(0), ..ListingPatch::default() };
    patch.apply(&mut listing);
    assert_eq!(listing.title, "New");
    assert_eq!(listing.price, 0);
    assert_eq!(listing.contact, "9800000000");
    assert_eq!(listing.id, "p-1");
}

#[test]
fn unpin_patch_clears_timestamp() {
    let at = Utc::now();
    let mut listing = Listing::default();
    ListingPatch::pin(at).apply(&mut listing);
    assert!(listing.pinned);
    assert_eq!(listing.pinned_at, Some(at));
    ListingPatch::unpin().apply(&mut listing);
    assert!(!listing.pinned);
    assert_eq!(listing.pinned_at, None);
}

// =============================================================
// Serde layout
// =============================================================

#[test]
fn listing_serializes_with_camel_case_keys() {
    let listing = Listing {
        id: "p-1".to_owned(),
        title: "Bike".to_owned(),
        seller_username: "sneha".to_owned(),
        expiry_date: Some(day(2026, 3, 12)),
        ..Listing::default()
    };
    let json = serde_json::to_value(&listing).expect("serialize");
    assert_eq!(json["sellerUsername"], "sneha");
    assert_eq!(json["expiryDate"], "2026-03-12");
    assert!(json.get("pinnedAt").is_none());
}

#[test]
fn legacy_owner_field_maps_to_seller() {
    let json = r#"{"id":"p-9","title":"Desk","owner":"sneha","price":1200}"#;
    let listing: Listing = serde_json::from_str(json).expect("deserialize");
    assert_eq!(listing.seller_username, "sneha");
    assert_eq!(listing.price, 1200);
    assert!(listing.images.is_empty());
    assert!(!listing.pinned);
}

#[test]
fn null_fields_read_as_defaults() {
    let json = r#"{"id":"p-2","title":"Free lamp","price":null,"description":null,"category":null,
        "contact":null,"owner":null,"images":null,"pinned":null}"#;
    let listing: Listing = serde_json::from_str(json).expect("deserialize");
    assert_eq!(listing.title, "Free lamp");
    assert_eq!(listing.price, 0);
    assert_eq!(listing.description, "");
    assert_eq!(listing.seller_username, "");
    assert!(listing.images.is_empty());
    assert!(!listing.pinned);
}

#[test]
fn missing_title_reads_as_empty() {
    let listing: Listing = serde_json::from_str(r#"{"id":"p-3"}"#).expect("deserialize");
    assert_eq!(listing.title, "");
}

#[test]
fn stored_prices_are_truncated_and_clamped() {
    let price = |raw: &str| {
        let listing: Listing = serde_json::from_str(&format!(r#"{{"title":"x","price":{raw}}}"#)).expect("deserialize");
        listing.price
    };
    assert_eq!(price("1500"), 1500);
    assert_eq!(price("99.9"), 99);
    assert_eq!(price("-20"), 0);
    assert_eq!(price(r#""2500""#), 2500);
    assert_eq!(price(r#""abc""#), 0);
    assert_eq!(price("true"), 0);
}

#[test]
fn images_skip_non_strings() {
    let json = r#"{"title":"x","images":["a.jpg",null,"",7,"b.jpg"]}"#;
    let listing: Listing = serde_json::from_str(json).expect("deserialize");
    assert_eq!(listing.images, ["a.jpg", "b.jpg"]);

    let single: Listing = serde_json::from_str(r#"{"title":"x","images":"c.jpg"}"#).expect("deserialize");
    assert_eq!(single.images, ["c.jpg"]);
}

#[test]
fn expiry_with_time_suffix_keeps_the_day() {
    let json = r#"{"title":"Phone","expiryDate":"2026-03-12T18:45:00.000Z"}"#;
    let listing: Listing = serde_json::from_str(json).expect("deserialize");
    assert_eq!(listing.expiry_date, Some(day(2026, 3, 12)));
}

#[test]
fn unparsable_dates_are_dropped_not_fatal() {
    let json = r#"{"title":"Phone","expiryDate":"someday","createdAt":"yesterday"}"#;
    let listing: Listing = serde_json::from_str(json).expect("deserialize");
    assert_eq!(listing.expiry_date, None);
    assert_eq!(listing.created_at, None);
}

#[test]
fn short_created_at_form_is_read_as_utc() {
    let ts = parse_timestamp("2026-03-10 09:30").expect("timestamp");
    assert_eq!(ts.to_rfc3339(), "2026-03-10T09:30:00+00:00");
}

#[test]
fn role_serializes_lowercase() {
    let user = User::new("sohaum", "sohaum", Role::Admin);
    let json = serde_json::to_value(&user).expect("serialize");
    assert_eq!(json["role"], "admin");
}

#[test]
fn default_users_have_one_admin_and_one_user() {
    let users = default_users();
    assert_eq!(users.len(), 2);
    assert_eq!(users.iter().filter(|u| u.role == Role::Admin).count(), 1);
    assert_eq!(users.iter().filter(|u| u.role == Role::User).count(), 1);
}
