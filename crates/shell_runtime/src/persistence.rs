//! Slot keys, boot hydration, and per-slot save helpers over [`SlotStore`].
//!
//! Slot names keep the `oldEra_` prefix of the stored localStorage format.
//! Absent slots are seeded with the built-in catalogs on first load; a slot
//! that exists but fails to parse falls back to defaults in memory without
//! overwriting the stored value.

use serde::{de::DeserializeOwned, Serialize};
use shell_storage::{load_slot_with, save_slot_with, SlotStore};

use crate::catalog;
use crate::model::{
    CreditPack, SeasonReward, Settings, ShellState, StoreItem, User, MASTER_USERNAME,
};

/// Slot holding the user collection.
pub const USERS_SLOT: &str = "oldEra_users";
/// Slot holding the store item catalog.
pub const STORE_ITEMS_SLOT: &str = "oldEra_storeItems";
/// Slot holding the global settings.
pub const SETTINGS_SLOT: &str = "oldEra_settings";
/// Slot holding the season reward table.
pub const SEASON_REWARDS_SLOT: &str = "oldEra_seasonRewards";
/// Slot holding the credit pack catalog.
pub const CREDIT_PACKS_SLOT: &str = "oldEra_creditPacks";
/// Slot holding the session pointer (current user id as a JSON string).
pub const SESSION_SLOT: &str = "oldEra_currentUser";

fn load_or_seed<S, T>(store: &S, key: &str, default: impl FnOnce() -> T) -> Result<T, String>
where
    S: SlotStore + ?Sized,
    T: Serialize + DeserializeOwned,
{
    match load_slot_with::<S, T>(store, key) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => {
            let value = default();
            save_slot_with(store, key, &value)?;
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(key, %err, "slot failed to parse; using defaults");
            Ok(default())
        }
    }
}

/// Loads the full shell state from storage, seeding defaults where absent.
///
/// The master account is re-seeded whenever the well-known username is
/// missing from the stored user list. The session pointer is resolved against
/// the loaded users; a stale pointer yields a logged-out state.
///
/// # Errors
///
/// Returns an error when the storage bridge itself fails.
pub fn load_initial_state<S: SlotStore + ?Sized>(store: &S) -> Result<ShellState, String> {
    let now_ms = shell_storage::unix_time_ms_now();
    let mut users: Vec<User> = load_or_seed(store, USERS_SLOT, || {
        vec![catalog::master_account(now_ms)]
    })?;
    if !users.iter().any(|u| u.username == MASTER_USERNAME) {
        tracing::warn!(username = MASTER_USERNAME, "master account missing; reseeding");
        users.push(catalog::master_account(now_ms));
        save_users(store, &users)?;
    }

    let store_items = load_or_seed(store, STORE_ITEMS_SLOT, catalog::default_store_items)?;
    let settings = load_or_seed(store, SETTINGS_SLOT, catalog::default_settings)?;
    let season_rewards = load_or_seed(store, SEASON_REWARDS_SLOT, catalog::generate_season_rewards)?;
    let credit_packs = load_or_seed(store, CREDIT_PACKS_SLOT, catalog::default_credit_packs)?;

    let session_id: Option<String> = load_slot_with(store, SESSION_SLOT).unwrap_or_default();
    let current_user = session_id.and_then(|id| users.iter().find(|u| u.id == id).cloned());

    let mut state = ShellState::new(users, store_items, credit_packs, settings, season_rewards);
    state.current_user = current_user;
    Ok(state)
}

/// Persists the user collection.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn save_users<S: SlotStore + ?Sized>(store: &S, users: &[User]) -> Result<(), String> {
    save_slot_with(store, USERS_SLOT, &users)
}

/// Persists the store item catalog.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn save_store_items<S: SlotStore + ?Sized>(
    store: &S,
    items: &[StoreItem],
) -> Result<(), String> {
    save_slot_with(store, STORE_ITEMS_SLOT, &items)
}

/// Persists the global settings.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn save_settings<S: SlotStore + ?Sized>(store: &S, settings: &Settings) -> Result<(), String> {
    save_slot_with(store, SETTINGS_SLOT, settings)
}

/// Persists the season reward table.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn save_season_rewards<S: SlotStore + ?Sized>(
    store: &S,
    rewards: &[SeasonReward],
) -> Result<(), String> {
    save_slot_with(store, SEASON_REWARDS_SLOT, &rewards)
}

/// Persists the credit pack catalog.
///
/// # Errors
///
/// Returns an error when serialization or the storage write fails.
pub fn save_credit_packs<S: SlotStore + ?Sized>(
    store: &S,
    packs: &[CreditPack],
) -> Result<(), String> {
    save_slot_with(store, CREDIT_PACKS_SLOT, &packs)
}

/// Persists the session pointer.
///
/// # Errors
///
/// Returns an error when the storage write fails.
pub fn save_session<S: SlotStore + ?Sized>(store: &S, user_id: &str) -> Result<(), String> {
    save_slot_with(store, SESSION_SLOT, &user_id)
}

/// Deletes the session pointer.
///
/// # Errors
///
/// Returns an error when the storage delete fails.
pub fn clear_session<S: SlotStore + ?Sized>(store: &S) -> Result<(), String> {
    store.delete(SESSION_SLOT)
}
