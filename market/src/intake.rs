//! Sell form validation and normalization.
//!
//! DESIGN
//! ======
//! [`validate`] is pure: it turns the raw form strings and the already-read
//! uploads into a ready-to-store [`Listing`] or the first validation
//! failure. Persisting is the caller's job (see `Marketplace::submit`), so a
//! rejected form can never touch storage.
//!
//! Checks run in a fixed order (title, contact, price, expiry) and only the
//! first failure is reported.
//!
//! Image problems never block a submission. Oversized uploads and uploads
//! beyond the per-listing cap come back as [`IntakeWarning`]s next to the
//! accepted listing.

#[cfg(test)]
#[path = "intake_test.rs"]
mod intake_test;

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::config::MarketConfig;
use crate::image::{ImageUpload, split_image_urls};
use crate::model::{Listing, parse_date};
use crate::store::{Notice, StoreError};

pub const POSTED_NOTICE: &str = "Ad posted!";

/// Raw sell form fields exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SellForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub contact: String,
    pub location: String,
    pub price: String,
    /// `YYYY-MM-DD`; blank means no expiry.
    pub expiry: String,
    /// Comma-separated image URLs typed alongside uploads.
    pub image_urls: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Please enter a title.")]
    MissingTitle,
    #[error("Enter a 10-digit phone number or an email address.")]
    InvalidContact,
    #[error("Price must be a number.")]
    InvalidPrice,
    #[error("Price cannot exceed {ceiling} rupees.")]
    PriceTooHigh { ceiling: u64 },
    #[error("Expiry date must be a valid date (YYYY-MM-DD).")]
    InvalidExpiry,
    #[error("Expiry date must be between today and {max_days} days from now.")]
    ExpiryOutOfRange { max_days: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Notice for IntakeError {
    fn notice(&self) -> String {
        match self {
            Self::Store(e) => e.notice(),
            other => format!("❌ {other}"),
        }
    }
}

/// Non-blocking problems found while accepting images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntakeWarning {
    OversizedImage { file_name: String, bytes: usize },
    TooManyImages { kept: usize, dropped: usize },
}

impl fmt::Display for IntakeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedImage { file_name, bytes } => {
                write!(f, "⚠️ {file_name} is large ({} KB) and may fill up storage.", bytes / 1024)
            }
            Self::TooManyImages { kept, dropped } => {
                write!(f, "⚠️ Only the first {kept} images were kept ({dropped} dropped).")
            }
        }
    }
}

/// An accepted form: the listing to store plus any image warnings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub listing: Listing,
    pub warnings: Vec<IntakeWarning>,
}

/// Validate `form` and build the listing `seller` is posting.
///
/// The returned listing has no id or creation time yet; the repository
/// assigns both on insert.
///
/// # Errors
///
/// Returns the first failing check as an [`IntakeError`].
pub fn validate(
    form: &SellForm,
    uploads: &[ImageUpload],
    seller: &str,
    today: NaiveDate,
    config: &MarketConfig,
) -> Result<Submission, IntakeError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(IntakeError::MissingTitle);
    }
    let contact = form.contact.trim();
    if !is_valid_contact(contact) {
        return Err(IntakeError::InvalidContact);
    }
    let price = parse_price(&form.price, config.price_ceiling)?;
    let expiry_date = parse_expiry(&form.expiry, today, config.expiry_window_days)?;
    let (images, warnings) = collect_images(uploads, &form.image_urls, config);

    let location = Some(form.location.trim()).filter(|s| !s.is_empty()).map(str::to_owned);
    let listing = Listing {
        title: title.to_owned(),
        description: form.description.trim().to_owned(),
        category: form.category.trim().to_owned(),
        contact: contact.to_owned(),
        seller_username: seller.to_owned(),
        location,
        price,
        images,
        expiry_date,
        ..Listing::default()
    };
    Ok(Submission { listing, warnings })
}

/// Exactly ten ASCII digits, or anything containing `@`.
#[must_use]
pub fn is_valid_contact(contact: &str) -> bool {
    let contact = contact.trim();
    contact.contains('@') || (contact.len() == 10 && contact.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse the price field into whole rupees.
///
/// Blank is free, negative amounts clamp to zero and any fraction is
/// truncated.
///
/// # Errors
///
/// [`IntakeError::InvalidPrice`] for non-numeric input,
/// [`IntakeError::PriceTooHigh`] above `ceiling`.
pub fn parse_price(raw: &str, ceiling: u64) -> Result<u64, IntakeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(IntakeError::InvalidPrice);
    }
    if negative {
        return Ok(0);
    }
    let whole = whole.trim_start_matches('0');
    if whole.is_empty() {
        return Ok(0);
    }
    match whole.parse::<u64>() {
        Ok(price) if price <= ceiling => Ok(price),
        _ => Err(IntakeError::PriceTooHigh { ceiling }),
    }
}

/// Parse the optional expiry and check it falls in
/// `[today, today + window_days]`.
///
/// # Errors
///
/// [`IntakeError::InvalidExpiry`] when unparsable,
/// [`IntakeError::ExpiryOutOfRange`] outside the window.
pub fn parse_expiry(raw: &str, today: NaiveDate, window_days: u32) -> Result<Option<NaiveDate>, IntakeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let expiry = parse_date(raw).ok_or(IntakeError::InvalidExpiry)?;
    let (earliest, latest) = expiry_bounds(today, window_days);
    if expiry < earliest || expiry > latest {
        return Err(IntakeError::ExpiryOutOfRange { max_days: window_days });
    }
    Ok(Some(expiry))
}

/// First and last acceptable expiry dates, both inclusive.
#[must_use]
pub fn expiry_bounds(today: NaiveDate, window_days: u32) -> (NaiveDate, NaiveDate) {
    let latest = today.checked_add_days(Days::new(u64::from(window_days))).unwrap_or(NaiveDate::MAX);
    (today, latest)
}

fn collect_images(uploads: &[ImageUpload], typed_urls: &str, config: &MarketConfig) -> (Vec<String>, Vec<IntakeWarning>) {
    let mut warnings = Vec::new();
    let typed = split_image_urls(typed_urls);
    let offered = uploads.len() + typed.len();
    let kept_uploads = uploads.len().min(config.max_images);

    let mut images: Vec<String> = Vec::with_capacity(offered.min(config.max_images));
    for upload in &uploads[..kept_uploads] {
        if upload.size() > config.image_warn_bytes {
            tracing::warn!(file = %upload.file_name, bytes = upload.size(), "accepting oversized image");
            warnings.push(IntakeWarning::OversizedImage { file_name: upload.file_name.clone(), bytes: upload.size() });
        }
        images.push(upload.to_data_url());
    }
    images.extend(typed.into_iter().take(config.max_images - kept_uploads));

    if offered > images.len() {
        warnings.push(IntakeWarning::TooManyImages { kept: images.len(), dropped: offered - images.len() });
    }
    (images, warnings)
}
