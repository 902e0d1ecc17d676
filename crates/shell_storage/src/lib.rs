//! Synchronous slot-storage adapters for the shell runtime.
//!
//! Every durable piece of shell state lives in a named slot holding one JSON
//! string. This crate hides the storage capability behind [`SlotStore`] so the
//! runtime can write through localStorage on wasm targets and an in-memory map
//! in tests and native builds.
//!
//! # Example
//!
//! ```rust
//! use shell_storage::{load_slot_with, save_slot_with, MemorySlotStore, SlotStore};
//!
//! let store = MemorySlotStore::default();
//! save_slot_with(&store, "example.counter", &3_u32).expect("save");
//! assert_eq!(load_slot_with::<_, u32>(&store, "example.counter"), Ok(Some(3)));
//! store.delete("example.counter").expect("delete");
//! assert_eq!(store.load("example.counter"), Ok(None));
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebSlotStore;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Key/value store for JSON-serialized state slots.
///
/// All operations are synchronous; the runtime treats a failed write as fatal
/// to the operation that requested it.
pub trait SlotStore {
    /// Loads the raw JSON string stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage bridge fails.
    fn load(&self, key: &str) -> Result<Option<String>, String>;

    /// Saves a raw JSON string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage bridge fails.
    fn save(&self, key: &str, raw_json: &str) -> Result<(), String>;

    /// Deletes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying storage bridge fails.
    fn delete(&self, key: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op slot store for unsupported targets and baseline tests.
pub struct NoopSlotStore;

impl SlotStore for NoopSlotStore {
    fn load(&self, _key: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn save(&self, _key: &str, _raw_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory slot store keyed by string.
///
/// Clones share the same backing map, matching the shared-document behavior of
/// browser localStorage within one page.
pub struct MemorySlotStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlotStore {
    /// Returns whether a slot currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }
}

impl SlotStore for MemorySlotStore {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, raw_json: &str) -> Result<(), String> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed slot value through a [`SlotStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_slot_with<S: SlotStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed slot value through a [`SlotStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub fn save_slot_with<S: SlotStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save(key, &raw)
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SlotThing {
        maintenance_mode: bool,
    }

    #[test]
    fn memory_slot_store_round_trip_and_delete() {
        let store = MemorySlotStore::default();
        let store_obj: &dyn SlotStore = &store;

        store_obj.save("slot.key", "{\"k\":1}").expect("save");
        assert_eq!(
            store_obj.load("slot.key").expect("load"),
            Some("{\"k\":1}".to_string())
        );
        store_obj.delete("slot.key").expect("delete");
        assert_eq!(store_obj.load("slot.key").expect("load"), None);
    }

    #[test]
    fn memory_slot_store_clones_share_backing_map() {
        let store = MemorySlotStore::default();
        let view = store.clone();

        store.save("shared", "1").expect("save");
        assert_eq!(view.load("shared").expect("load"), Some("1".to_string()));
        assert!(view.contains("shared"));
    }

    #[test]
    fn typed_slot_helpers_round_trip() {
        let store = MemorySlotStore::default();
        let store_obj: &dyn SlotStore = &store;
        save_slot_with(
            store_obj,
            "settings",
            &SlotThing {
                maintenance_mode: true,
            },
        )
        .expect("save typed slot");

        let loaded: Option<SlotThing> =
            load_slot_with(store_obj, "settings").expect("load typed slot");
        assert_eq!(
            loaded,
            Some(SlotThing {
                maintenance_mode: true
            })
        );
    }

    #[test]
    fn typed_slot_load_reports_malformed_json() {
        let store = MemorySlotStore::default();
        store.save("bad", "not-json").expect("save");
        assert!(load_slot_with::<_, u32>(&store, "bad").is_err());
    }

    #[test]
    fn noop_slot_store_is_empty_and_successful() {
        let store = NoopSlotStore;
        let store_obj: &dyn SlotStore = &store;
        assert_eq!(store_obj.load("k").expect("load"), None);
        store_obj.save("k", "{}").expect("save");
        store_obj.delete("k").expect("delete");
    }
}
