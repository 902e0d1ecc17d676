//! `localStorage`-backed slot store implementation.
//!
//! This adapter is intentionally small and synchronous at the browser API
//! boundary; slot writes map one-to-one onto `localStorage.setItem` calls.

use crate::SlotStore;

#[derive(Debug, Clone, Copy, Default)]
/// Browser slot store backed by `window.localStorage`.
pub struct WebSlotStore;

fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl SlotStore for WebSlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        let storage = local_storage()?;
        storage
            .get_item(key)
            .map_err(|e| format!("localStorage get_item failed: {e:?}"))
    }

    fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        let storage = local_storage()?;
        storage
            .set_item(key, raw_json)
            .map_err(|e| format!("localStorage set_item failed: {e:?}"))
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        let storage = local_storage()?;
        storage
            .remove_item(key)
            .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
    }
}
