//! Fixtures shared by unit tests here and in dependent crates.
//!
//! Enabled for this crate's own tests and, for other crates, through the
//! `test-support` feature.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::model::Listing;

/// Clock that starts at a fixed instant and moves one second forward on
/// every reading, so successive pins get distinct, increasing timestamps.
#[derive(Debug)]
pub struct TestClock {
    base: DateTime<Utc>,
    ticks: AtomicI64,
}

impl TestClock {
    #[must_use]
    pub fn new(base: DateTime<Utc>) -> Self {
        Self { base, ticks: AtomicI64::new(0) }
    }

    /// Clock starting at 12:00 UTC on the given day, or the Unix epoch if the
    /// date does not exist.
    #[must_use]
    pub fn at_noon(year: i32, month: u32, day: u32) -> Self {
        let base = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single().unwrap_or_default();
        Self::new(base)
    }

    /// Jump `seconds` forward.
    pub fn advance(&self, seconds: i64) {
        self.ticks.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::at_noon(2026, 3, 10)
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + TimeDelta::seconds(tick)
    }
}

/// Unsaved listing with the given title, seller and price.
#[must_use]
pub fn listing(title: &str, seller: &str, price: u64) -> Listing {
    Listing {
        title: title.to_owned(),
        description: format!("{title} in good condition"),
        category: "Other".to_owned(),
        contact: "9800000000".to_owned(),
        seller_username: seller.to_owned(),
        price,
        ..Listing::default()
    }
}
