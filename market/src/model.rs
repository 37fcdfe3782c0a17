//! Listing and user records as persisted in the key-value store.
//!
//! DESIGN
//! ======
//! Field names follow the persisted camelCase JSON layout so records written
//! by older page scripts keep loading. Timestamps are UTC instants; the
//! expiry date is a plain calendar date compared against the local day.
//!
//! TRADE-OFFS
//! ==========
//! Reads are lenient: `null` fields read as their default, prices written
//! as floats, strings or negative numbers are truncated and clamped to zero,
//! and a timestamp or expiry date that does not parse is dropped (logged).
//! Older page scripts stored all of these, and one rejected record would
//! otherwise hide every listing.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// LISTING
// =============================================================================

/// A classified ad as stored under the products key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Opaque unique id. Empty until the repository assigns one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Phone number or email address of the seller.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: String,
    /// Username of the account that posted the listing.
    #[serde(default, alias = "owner", deserialize_with = "null_as_default")]
    pub seller_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Whole rupees; `0` means the item is free.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: u64,
    /// Image URLs or inline `data:` URLs, in display order.
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    /// Set once by the repository on insert.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last calendar day on which the listing is shown.
    #[serde(default, deserialize_with = "deserialize_expiry", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pinned: bool,
    #[serde(default, deserialize_with = "deserialize_timestamp", skip_serializing_if = "Option::is_none")]
    pub pinned_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Whether the listing is still visible on `today` (local calendar day).
    ///
    /// A listing without an expiry date never expires; one expiring today is
    /// still active.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_none_or(|expiry| expiry >= today)
    }

    /// Pinned and not expired. Expired listings keep their flag but never
    /// count as pinned.
    #[must_use]
    pub fn is_featured(&self, today: NaiveDate) -> bool {
        self.pinned && self.is_active(today)
    }

    /// Whether `username` posted this listing.
    #[must_use]
    pub fn is_owned_by(&self, username: &str) -> bool {
        !self.seller_username.is_empty() && self.seller_username == username
    }
}

/// Partial changes merged into a stored listing by `update`.
///
/// `id` and `createdAt` are deliberately absent: they never change after
/// insert.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub contact: Option<String>,
    pub location: Option<Option<String>>,
    pub price: Option<u64>,
    pub images: Option<Vec<String>>,
    pub expiry_date: Option<Option<NaiveDate>>,
    pub pinned: Option<bool>,
    pub pinned_at: Option<Option<DateTime<Utc>>>,
}

impl ListingPatch {
    /// Patch that flags a listing as pinned at `at`.
    #[must_use]
    pub fn pin(at: DateTime<Utc>) -> Self {
        Self { pinned: Some(true), pinned_at: Some(Some(at)), ..Self::default() }
    }

    /// Patch that clears the pinned flag and timestamp.
    #[must_use]
    pub fn unpin() -> Self {
        Self { pinned: Some(false), pinned_at: Some(None), ..Self::default() }
    }

    /// Merge every present field into `listing`.
    pub fn apply(&self, listing: &mut Listing) {
        if let Some(title) = &self.title {
            listing.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            listing.description.clone_from(description);
        }
        if let Some(category) = &self.category {
            listing.category.clone_from(category);
        }
        if let Some(contact) = &self.contact {
            listing.contact.clone_from(contact);
        }
        if let Some(location) = &self.location {
            listing.location.clone_from(location);
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(images) = &self.images {
            listing.images.clone_from(images);
        }
        if let Some(expiry_date) = self.expiry_date {
            listing.expiry_date = expiry_date;
        }
        if let Some(pinned) = self.pinned {
            listing.pinned = pinned;
        }
        if let Some(pinned_at) = self.pinned_at {
            listing.pinned_at = pinned_at;
        }
    }
}

// =============================================================================
// USERS
// =============================================================================

/// Account role. Only admins may pin, and admins may delete any listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// Stored account. The password is kept and compared as plain text; this is
/// a demo convenience, not an authentication boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self { username: username.to_owned(), password: password.to_owned(), role }
    }
}

/// Accounts written on first run when the user list is empty.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![User::new("sohaum", "sohaum", Role::Admin), User::new("sneha", "sneha", Role::User)]
}

/// The logged-in user attempting an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub fn new(username: &str, role: Role) -> Self {
        Self { username: username.to_owned(), role }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// LENIENT DECODING
// =============================================================================

/// Parse a calendar date, ignoring any `T...` time suffix.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Parse an RFC 3339 instant, or the `YYYY-MM-DD HH:MM` form some page
/// variants stored (read as UTC).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Some(naive.and_utc());
    }
    parse_date(raw).and_then(|day| day.and_hms_opt(0, 0, 0)).map(|naive| naive.and_utc())
}

fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).filter(|s| !s.is_empty()).and_then(|s| {
        let parsed = parse_date(s);
        if parsed.is_none() {
            tracing::warn!(value = s, "ignoring unparsable expiryDate");
        }
        parsed
    }))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(str::trim).filter(|s| !s.is_empty()).and_then(|s| {
        let parsed = parse_timestamp(s);
        if parsed.is_none() {
            tracing::warn!(value = s, "ignoring unparsable timestamp");
        }
        parsed
    }))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map_or(0, lenient_price))
}

/// Whole rupees from any JSON scalar. Fractions truncate; negative,
/// non-numeric and non-finite values read as free.
#[must_use]
pub fn lenient_price(value: &Value) -> u64 {
    let amount = match value {
        Value::Number(n) => match n.as_u64() {
            Some(whole) => return whole,
            None => n.as_f64().unwrap_or(0.0),
        },
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = amount.trunc() as u64;
    whole
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keep = |v: Value| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    };
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(keep).collect(),
        Some(single) => keep(single).into_iter().collect(),
        None => Vec::new(),
    })
}
