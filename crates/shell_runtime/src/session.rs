//! Session orchestrator: owns the live state and a [`SlotStore`], applies
//! reducer actions, and executes persistence effects synchronously.

use shell_storage::SlotStore;

use crate::model::{ShellState, ToastKind};
use crate::persistence;
use crate::reducer::{reduce, ShellAction, ShellEffect, ShellError};

/// The running shell: state plus the storage bridge behind it.
///
/// `dispatch` applies the reducer and immediately executes every persistence
/// effect against the store; presentation effects (theme styles, toast expiry
/// timers) are returned to the caller to act on. A storage write failure
/// aborts the dispatch with [`ShellError::Storage`], leaving the in-memory
/// state ahead of the stored one until the next successful write.
pub struct ShellSession<S: SlotStore> {
    state: ShellState,
    store: S,
}

impl<S: SlotStore> ShellSession<S> {
    /// Hydrates the shell from storage, seeding defaults on first boot.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Storage`] when the storage bridge fails.
    pub fn boot(store: S) -> Result<Self, ShellError> {
        let state = persistence::load_initial_state(&store).map_err(ShellError::Storage)?;
        tracing::info!(
            users = state.users.len(),
            logged_in = state.current_user.is_some(),
            "shell session hydrated"
        );
        Ok(Self { state, store })
    }

    /// Read access to the live state.
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// The storage bridge backing this session.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies an action and executes its persistence effects, returning the
    /// presentation effects left for the caller.
    ///
    /// # Errors
    ///
    /// Propagates reducer errors, plus [`ShellError::Storage`] when a
    /// persistence effect fails to write.
    pub fn dispatch(&mut self, action: ShellAction) -> Result<Vec<ShellEffect>, ShellError> {
        let now_ms = shell_storage::unix_time_ms_now();
        let effects = reduce(&mut self.state, action, now_ms)?;
        let mut pending = Vec::new();
        for effect in effects {
            match &effect {
                ShellEffect::PersistUsers => {
                    persistence::save_users(&self.store, &self.state.users)
                }
                ShellEffect::PersistSession => match &self.state.current_user {
                    Some(user) => persistence::save_session(&self.store, &user.id),
                    None => persistence::clear_session(&self.store),
                },
                ShellEffect::ClearSession => persistence::clear_session(&self.store),
                ShellEffect::PersistStoreItems => {
                    persistence::save_store_items(&self.store, &self.state.store_items)
                }
                ShellEffect::PersistSettings => {
                    persistence::save_settings(&self.store, &self.state.settings)
                }
                ShellEffect::PersistSeasonRewards => {
                    persistence::save_season_rewards(&self.store, &self.state.season_rewards)
                }
                ShellEffect::PersistCreditPacks => {
                    persistence::save_credit_packs(&self.store, &self.state.credit_packs)
                }
                ShellEffect::ApplyThemeStyle(_) | ShellEffect::ScheduleToastExpiry { .. } => {
                    pending.push(effect);
                    continue;
                }
            }
            .map_err(ShellError::Storage)?;
            tracing::debug!(?effect, "slot persisted");
        }
        Ok(pending)
    }

    /// Convenience for surfacing a transient toast.
    ///
    /// # Errors
    ///
    /// See [`ShellSession::dispatch`].
    pub fn push_toast(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
    ) -> Result<Vec<ShellEffect>, ShellError> {
        self.dispatch(ShellAction::PushToast {
            kind,
            message: message.into(),
        })
    }

    /// Convenience for appending to the notification log.
    ///
    /// # Errors
    ///
    /// See [`ShellSession::dispatch`].
    pub fn push_notification(
        &mut self,
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Vec<ShellEffect>, ShellError> {
        self.dispatch(ShellAction::PushNotification {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shell_storage::MemorySlotStore;

    use super::*;
    use crate::accounts::RegisterRequest;
    use crate::model::User;
    use crate::persistence::{SESSION_SLOT, USERS_SLOT};

    fn registered_session() -> ShellSession<MemorySlotStore> {
        let mut session = ShellSession::boot(MemorySlotStore::default()).expect("boot");
        session
            .dispatch(ShellAction::Register(RegisterRequest {
                username: "zoro".into(),
                secret: "santoryu".into(),
                confirm_secret: "santoryu".into(),
                character_name: "Roronoa Zoro".into(),
                avatar: "⚔️".into(),
            }))
            .expect("register");
        session
            .dispatch(ShellAction::Login {
                username: "zoro".into(),
                secret: "santoryu".into(),
            })
            .expect("login");
        session
    }

    fn stored_users(store: &MemorySlotStore) -> Vec<User> {
        shell_storage::load_slot_with(store, USERS_SLOT)
            .expect("load users")
            .expect("users slot present")
    }

    #[test]
    fn boot_on_an_empty_store_seeds_and_reboots_identically() {
        let store = MemorySlotStore::default();
        let session = ShellSession::boot(store.clone()).expect("first boot");
        assert_eq!(session.state().users.len(), 1);

        let again = ShellSession::boot(store).expect("second boot");
        assert_eq!(again.state().users, session.state().users);
    }

    #[test]
    fn login_persists_the_session_pointer_and_a_reboot_restores_it() {
        let session = registered_session();
        let store = session.store().clone();
        let user_id = session.state().current_user.as_ref().expect("user").id.clone();

        let pointer: String = shell_storage::load_slot_with(&store, SESSION_SLOT)
            .expect("load pointer")
            .expect("pointer present");
        assert_eq!(pointer, user_id);

        let rebooted = ShellSession::boot(store).expect("reboot");
        assert_eq!(
            rebooted.state().current_user.as_ref().map(|u| u.id.as_str()),
            Some(user_id.as_str())
        );
    }

    #[test]
    fn purchases_write_the_users_slot_synchronously() {
        let mut session = registered_session();
        session
            .dispatch(ShellAction::PurchaseItem { item_id: "1".into() })
            .expect("purchase");

        let users = stored_users(session.store());
        let buyer = users.iter().find(|u| u.username == "zoro").expect("buyer");
        assert_eq!(buyer.berries, 7500);
        assert!(buyer.owns_item("1"));
    }

    #[test]
    fn logout_deletes_the_session_pointer() {
        let mut session = registered_session();
        assert!(session.store().contains(SESSION_SLOT));

        session.dispatch(ShellAction::Logout).expect("logout");

        assert!(!session.store().contains(SESSION_SLOT));
        assert!(session.state().current_user.is_none());
    }

    #[test]
    fn presentation_effects_are_handed_back_to_the_caller() {
        let mut session = registered_session();
        let effects = session
            .push_toast(ToastKind::Success, "Item comprado!")
            .expect("toast");
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            ShellEffect::ScheduleToastExpiry { .. }
        ));

        let effects = session
            .dispatch(ShellAction::SetTheme {
                theme_id: "piratas".into(),
            })
            .expect("theme");
        assert!(matches!(effects[0], ShellEffect::ApplyThemeStyle(_)));
    }

    #[test]
    fn notification_log_survives_in_memory_but_not_logout() {
        let mut session = registered_session();
        session
            .push_notification("🛒", "Compra", "Item comprado")
            .expect("notify");
        assert_eq!(session.state().notifications.len(), 1);

        session.dispatch(ShellAction::Logout).expect("logout");
        assert!(session.state().notifications.is_empty());
    }
}
