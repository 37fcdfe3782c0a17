//! Tunables for storage layout, pinning, intake limits and presentation.
//!
//! Defaults reproduce the behavior of the live site; the CLI overrides a few
//! of them from flags and environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PIN_LIMIT: usize = 5;
pub const DEFAULT_MAX_IMAGES: usize = 6;
pub const DEFAULT_PRICE_CEILING: u64 = 10_000_000;
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_IMAGE_WARN_BYTES: usize = 1024 * 1024;
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const PLACEHOLDER_IMAGE: &str = "assets/images/placeholder.jpg";
pub const GUEST_USERNAME: &str = "guest";

/// Storage keys for the three persisted entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub products: String,
    pub users: String,
    pub current_user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            products: "products".to_owned(),
            users: "users".to_owned(),
            current_user: "currentUser".to_owned(),
        }
    }
}

/// Upper bound on simultaneously pinned (active) listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinLimit {
    Unlimited,
    Capped(usize),
}

impl Default for PinLimit {
    fn default() -> Self {
        Self::Capped(DEFAULT_PIN_LIMIT)
    }
}

impl PinLimit {
    /// Whether `pinned_count` active pins leave no room for another.
    #[must_use]
    pub fn is_full(self, pinned_count: usize) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Capped(limit) => pinned_count >= limit,
        }
    }

    #[must_use]
    pub fn cap(self) -> Option<usize> {
        match self {
            Self::Unlimited => None,
            Self::Capped(limit) => Some(limit),
        }
    }
}

impl fmt::Display for PinLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => f.write_str("unlimited"),
            Self::Capped(limit) => write!(f, "{limit}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid pin limit `{0}` (expected a number or `unlimited`)")]
pub struct ParsePinLimitError(String);

impl FromStr for PinLimit {
    type Err = ParsePinLimitError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("unlimited") {
            return Ok(Self::Unlimited);
        }
        raw.parse::<usize>().map(Self::Capped).map_err(|_| ParsePinLimitError(raw.to_owned()))
    }
}

/// All marketplace tunables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub keys: StorageKeys,
    pub pin_limit: PinLimit,
    /// Images kept per listing; extra uploads are dropped with a warning.
    pub max_images: usize,
    /// Highest accepted price in rupees.
    pub price_ceiling: u64,
    /// Expiry must fall within `[today, today + expiry_window_days]`.
    pub expiry_window_days: u32,
    /// Images above this size are accepted but produce a warning.
    pub image_warn_bytes: usize,
    pub placeholder_image: String,
    pub page_size: usize,
    /// Seller recorded when a listing is posted while logged out.
    pub guest_username: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            pin_limit: PinLimit::default(),
            max_images: DEFAULT_MAX_IMAGES,
            price_ceiling: DEFAULT_PRICE_CEILING,
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
            image_warn_bytes: DEFAULT_IMAGE_WARN_BYTES,
            placeholder_image: PLACEHOLDER_IMAGE.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            guest_username: GUEST_USERNAME.to_owned(),
        }
    }
}
