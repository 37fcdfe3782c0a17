//! `window.localStorage` as a [`KvStore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only persistence the site has. The handle is looked up on
//! every call instead of being cached, which keeps [`BrowserStore`] a
//! zero-sized `Copy` value that any component can build on demand.
//!
//! TRADE-OFFS
//! ==========
//! Outside the browser (`csr` disabled) there is no storage: reads see an
//! empty store and writes fail with a backend error. Native tests use
//! `market::store::MemoryStore` instead.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use market::store::{KvStore, StoreError};
use market::{MarketConfig, Marketplace};
use mockable::DefaultClock;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

/// Marketplace over the browser's storage and wall clock.
#[must_use]
pub fn marketplace() -> Marketplace<BrowserStore, DefaultClock> {
    Marketplace::with_config(BrowserStore, DefaultClock, MarketConfig::default())
}

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or_else(|| StoreError::Backend("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|e| StoreError::Backend(format!("{e:?}")))?
        .ok_or_else(|| StoreError::Backend("localStorage is disabled".to_owned()))
}

#[cfg(feature = "csr")]
fn classify(key: &str, err: wasm_bindgen::JsValue) -> StoreError {
    use wasm_bindgen::JsCast;

    match err.dyn_ref::<web_sys::DomException>() {
        Some(dom) if dom.name() == "QuotaExceededError" => StoreError::QuotaExceeded { key: key.to_owned() },
        _ => StoreError::Backend(format!("{err:?}")),
    }
}

impl KvStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(|e| classify(key, e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(|e| classify(key, e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = value;
            Err(StoreError::Backend(format!("no browser storage for `{key}`")))
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(key).map_err(|e| classify(key, e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
