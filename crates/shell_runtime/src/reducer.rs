//! Reducer actions, side-effect intents, and transition dispatch for the
//! shell runtime.
//!
//! [`reduce`] is the single entry point for state mutation: it routes each
//! action to the per-component transition modules and collects the persistence
//! and presentation side effects the orchestrator must execute. Domain-rule
//! violations that the UI pre-validates (replayed purchases, ineligible
//! claims, unknown user ids) return `Ok` with no effects rather than an error.

use thiserror::Error;

use crate::accounts::{self, RegisterRequest};
use crate::economy;
use crate::model::{
    AppId, CreditPack, SeasonReward, Settings, ShellState, StoreItem, ThemeStyle, ToastKind, User,
    WindowId,
};
use crate::notify;
use crate::windows;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors surfaced by [`reduce`] for actions the UI cannot pre-validate.
pub enum ShellError {
    /// Malformed or missing registration input.
    #[error("invalid registration input: {0}")]
    Validation(String),
    /// The requested username is already taken.
    #[error("username already taken")]
    DuplicateUsername,
    /// No user matches the supplied credentials.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Maintenance mode is active and the account is not a master.
    #[error("system under maintenance")]
    MaintenanceBlocked,
    /// Applying a cosmetic that is not in the user's owned set.
    #[error("cosmetic not owned")]
    NotOwned,
    /// Balance below the cost of the requested operation.
    #[error("insufficient berries")]
    InsufficientFunds,
    /// A synchronous storage write failed; the operation is aborted.
    #[error("storage failure: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce`] to mutate [`ShellState`].
pub enum ShellAction {
    /// Mark the boot sequence as finished.
    SetBooted,
    /// Authenticate and start a session.
    Login {
        /// Username to match, case-sensitively.
        username: String,
        /// Plaintext secret to verify.
        secret: String,
    },
    /// End the session, discarding windows and notifications.
    Logout,
    /// Create a new account.
    Register(RegisterRequest),
    /// Open an app window, or surface the existing one.
    OpenApp {
        /// App to open.
        app_id: AppId,
        /// Title for a newly created window.
        title: String,
        /// Emoji for a newly created window.
        emoji: String,
    },
    /// Remove a window entirely.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Toggle a window's maximized flag.
    MaximizeWindow {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Unminimize and raise a window.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Move a window (ignored while maximized).
    MoveWindow {
        /// Window being moved.
        window_id: WindowId,
        /// New left edge, in px.
        x: i32,
        /// New top edge, in px.
        y: i32,
    },
    /// Resize a window (ignored while maximized).
    ResizeWindow {
        /// Window being resized.
        window_id: WindowId,
        /// New width, in px.
        width: i32,
        /// New height, in px.
        height: i32,
    },
    /// Buy a store item for the signed-in user.
    PurchaseItem {
        /// Catalog id of the item to buy.
        item_id: String,
    },
    /// Drop an item from the signed-in user's inventory (no refund).
    DiscardItem {
        /// Catalog id of the item to drop.
        item_id: String,
    },
    /// Select an owned wallpaper.
    SetWallpaper {
        /// Wallpaper to activate.
        wallpaper_id: String,
    },
    /// Select an owned theme.
    SetTheme {
        /// Theme to activate.
        theme_id: String,
    },
    /// Claim a season reward on the free or premium track.
    ClaimReward {
        /// Reward level to claim.
        level: u32,
        /// `true` for the premium track.
        premium: bool,
    },
    /// Unlock the premium season-pass track.
    UpgradePremium,
    /// Show a transient toast.
    PushToast {
        /// Toast severity.
        kind: ToastKind,
        /// Message to display.
        message: String,
    },
    /// Remove a toast (expiry or manual dismissal).
    RemoveToast {
        /// Toast to remove.
        toast_id: u64,
    },
    /// Append to the notification log.
    PushNotification {
        /// Emoji icon for the entry.
        icon: String,
        /// Entry title.
        title: String,
        /// Entry body text.
        description: String,
    },
    /// Empty the notification log.
    ClearNotifications,
    /// Replace the whole store catalog (admin editor).
    UpdateStoreItems(Vec<StoreItem>),
    /// Append one item to the store catalog (admin editor).
    AddStoreItem(StoreItem),
    /// Remove one item from the store catalog (admin editor).
    DeleteStoreItem {
        /// Catalog id of the item to remove.
        item_id: String,
    },
    /// Replace a user record wholesale (admin editor).
    UpdateUser(User),
    /// Delete a user account (never the active session's own).
    DeleteUser {
        /// Account to delete.
        user_id: String,
    },
    /// Credit berries to a user (master panel).
    GiveBerries {
        /// Account to credit.
        user_id: String,
        /// Berries to add.
        amount: u64,
    },
    /// Grant an item to a user (master panel).
    GiveItem {
        /// Account receiving the item.
        user_id: String,
        /// Catalog id of the item to grant.
        item_id: String,
    },
    /// Set a user's display level (master panel).
    SetUserLevel {
        /// Account to update.
        user_id: String,
        /// New display level.
        level: u32,
    },
    /// Flip a user between player and master roles.
    ToggleUserRole {
        /// Account whose role is flipped.
        user_id: String,
    },
    /// Replace the global settings.
    UpdateSettings(Settings),
    /// Replace the season reward table (admin editor).
    UpdateSeasonRewards(Vec<SeasonReward>),
    /// Replace the credit pack catalog (admin editor).
    UpdateCreditPacks(Vec<CreditPack>),
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce`] for the session orchestrator.
pub enum ShellEffect {
    /// Persist the user collection slot.
    PersistUsers,
    /// Persist the session pointer (current user id).
    PersistSession,
    /// Delete the session pointer.
    ClearSession,
    /// Persist the store item catalog slot.
    PersistStoreItems,
    /// Persist the settings slot.
    PersistSettings,
    /// Persist the season reward table slot.
    PersistSeasonRewards,
    /// Persist the credit pack catalog slot.
    PersistCreditPacks,
    /// Re-derive presentation style values from the applied theme.
    ApplyThemeStyle(ThemeStyle),
    /// Arm the one-shot expiry timer for a pushed toast.
    ScheduleToastExpiry {
        /// Toast to expire.
        toast_id: u64,
        /// Timer delay, in milliseconds.
        duration_ms: u32,
    },
}

/// Applies a [`ShellAction`] to the shell state and collects side effects.
///
/// `now_ms` feeds account ids, creation timestamps, and notification
/// timestamps so transitions stay deterministic under test.
///
/// # Errors
///
/// Returns a [`ShellError`] for failed registration, authentication, cosmetic
/// application, and the premium upgrade; every other ineligible action is a
/// silent no-op.
pub fn reduce(
    state: &mut ShellState,
    action: ShellAction,
    now_ms: u64,
) -> Result<Vec<ShellEffect>, ShellError> {
    let mut effects = Vec::new();
    match action {
        ShellAction::SetBooted => {
            state.booted = true;
        }
        ShellAction::Login { username, secret } => {
            let (user, upgraded) = accounts::authenticate(state, &username, &secret)?;
            state.current_user = Some(user);
            state.windows.clear();
            if upgraded {
                effects.push(ShellEffect::PersistUsers);
            }
            effects.push(ShellEffect::PersistSession);
        }
        ShellAction::Logout => {
            state.current_user = None;
            state.windows.clear();
            state.notifications.clear();
            effects.push(ShellEffect::ClearSession);
        }
        ShellAction::Register(request) => {
            accounts::register(state, request, now_ms)?;
            effects.push(ShellEffect::PersistUsers);
        }
        ShellAction::OpenApp {
            app_id,
            title,
            emoji,
        } => {
            windows::open_or_focus(state, app_id, &title, &emoji);
        }
        ShellAction::CloseWindow { window_id } => {
            windows::close(state, window_id);
        }
        ShellAction::MinimizeWindow { window_id } => {
            windows::minimize(state, window_id);
        }
        ShellAction::MaximizeWindow { window_id } => {
            windows::toggle_maximize(state, window_id);
        }
        ShellAction::FocusWindow { window_id } => {
            windows::focus(state, window_id);
        }
        ShellAction::MoveWindow { window_id, x, y } => {
            windows::reposition(state, window_id, x, y);
        }
        ShellAction::ResizeWindow {
            window_id,
            width,
            height,
        } => {
            windows::resize(state, window_id, width, height);
        }
        ShellAction::PurchaseItem { item_id } => {
            if economy::purchase_item(state, &item_id) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::DiscardItem { item_id } => {
            if economy::discard_item(state, &item_id) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::SetWallpaper { wallpaper_id } => {
            if economy::apply_wallpaper(state, &wallpaper_id)? {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::SetTheme { theme_id } => {
            if state.current_user.is_some() {
                let style = economy::apply_theme(state, &theme_id)?;
                effects.push(ShellEffect::PersistUsers);
                if let Some(style) = style {
                    effects.push(ShellEffect::ApplyThemeStyle(style));
                }
            }
        }
        ShellAction::ClaimReward { level, premium } => {
            if economy::claim_reward(state, level, premium) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::UpgradePremium => {
            if economy::upgrade_premium(state)? {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::PushToast { kind, message } => {
            let toast_id = notify::push_toast(state, kind, &message);
            effects.push(ShellEffect::ScheduleToastExpiry {
                toast_id,
                duration_ms: crate::model::TOAST_DURATION_MS,
            });
        }
        ShellAction::RemoveToast { toast_id } => {
            notify::remove_toast(state, toast_id);
        }
        ShellAction::PushNotification {
            icon,
            title,
            description,
        } => {
            notify::push_notification(state, &icon, &title, &description, now_ms);
        }
        ShellAction::ClearNotifications => {
            notify::clear_notifications(state);
        }
        ShellAction::UpdateStoreItems(items) => {
            state.store_items = items;
            effects.push(ShellEffect::PersistStoreItems);
        }
        ShellAction::AddStoreItem(item) => {
            state.store_items.push(item);
            effects.push(ShellEffect::PersistStoreItems);
        }
        ShellAction::DeleteStoreItem { item_id } => {
            state.store_items.retain(|i| i.id != item_id);
            effects.push(ShellEffect::PersistStoreItems);
        }
        ShellAction::UpdateUser(user) => {
            if accounts::update_user(state, user) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::DeleteUser { user_id } => {
            if accounts::delete_user(state, &user_id) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::GiveBerries { user_id, amount } => {
            if accounts::give_berries(state, &user_id, amount) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::GiveItem { user_id, item_id } => {
            if accounts::give_item(state, &user_id, &item_id) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::SetUserLevel { user_id, level } => {
            if accounts::set_user_level(state, &user_id, level) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::ToggleUserRole { user_id } => {
            if accounts::toggle_role(state, &user_id) {
                effects.push(ShellEffect::PersistUsers);
            }
        }
        ShellAction::UpdateSettings(settings) => {
            state.settings = settings;
            effects.push(ShellEffect::PersistSettings);
        }
        ShellAction::UpdateSeasonRewards(rewards) => {
            state.season_rewards = rewards;
            effects.push(ShellEffect::PersistSeasonRewards);
        }
        ShellAction::UpdateCreditPacks(packs) => {
            state.credit_packs = packs;
            effects.push(ShellEffect::PersistCreditPacks);
        }
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog;
    use crate::model::TOAST_DURATION_MS;

    fn state() -> ShellState {
        ShellState::new(
            Vec::new(),
            catalog::default_store_items(),
            catalog::default_credit_packs(),
            catalog::default_settings(),
            catalog::generate_season_rewards(),
        )
    }

    fn request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            secret: "nakama".to_string(),
            confirm_secret: "nakama".to_string(),
            character_name: "Nico Robin".to_string(),
            avatar: "🌊".to_string(),
        }
    }

    fn login(state: &mut ShellState, username: &str) {
        reduce(
            state,
            ShellAction::Login {
                username: username.to_string(),
                secret: "nakama".to_string(),
            },
            10,
        )
        .expect("login");
    }

    #[test]
    fn register_then_login_starts_a_session() {
        let mut state = state();
        let effects = reduce(&mut state, ShellAction::Register(request("robin")), 1).expect("register");
        assert_eq!(effects, vec![ShellEffect::PersistUsers]);

        let effects = reduce(
            &mut state,
            ShellAction::Login {
                username: "robin".into(),
                secret: "nakama".into(),
            },
            2,
        )
        .expect("login");
        assert_eq!(effects, vec![ShellEffect::PersistSession]);
        assert_eq!(
            state.current_user.as_ref().map(|u| u.username.as_str()),
            Some("robin")
        );
        assert!(state.windows.is_empty());
    }

    #[test]
    fn failed_login_leaves_the_state_unchanged() {
        let mut state = state();
        reduce(&mut state, ShellAction::Register(request("robin")), 1).expect("register");
        let before = state.clone();

        let err = reduce(
            &mut state,
            ShellAction::Login {
                username: "robin".into(),
                secret: "wrong".into(),
            },
            2,
        )
        .expect_err("bad login");
        assert_eq!(err, ShellError::InvalidCredentials);
        assert_eq!(state, before);
    }

    #[test]
    fn logout_clears_session_windows_and_notifications() {
        let mut state = state();
        reduce(&mut state, ShellAction::Register(request("robin")), 1).expect("register");
        login(&mut state, "robin");
        reduce(
            &mut state,
            ShellAction::OpenApp {
                app_id: AppId::Store,
                title: AppId::Store.title().into(),
                emoji: AppId::Store.emoji().into(),
            },
            11,
        )
        .expect("open");
        reduce(
            &mut state,
            ShellAction::PushNotification {
                icon: "🔔".into(),
                title: "hi".into(),
                description: "there".into(),
            },
            12,
        )
        .expect("notify");

        let effects = reduce(&mut state, ShellAction::Logout, 13).expect("logout");

        assert_eq!(effects, vec![ShellEffect::ClearSession]);
        assert!(state.current_user.is_none());
        assert!(state.windows.is_empty());
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn purchase_scenario_debits_and_discard_keeps_balance() {
        let mut state = state();
        reduce(&mut state, ShellAction::Register(request("robin")), 1).expect("register");
        login(&mut state, "robin");
        assert_eq!(state.current_user.as_ref().expect("user").berries, 10000);

        let effects = reduce(
            &mut state,
            ShellAction::PurchaseItem { item_id: "1".into() },
            20,
        )
        .expect("purchase");
        assert_eq!(effects, vec![ShellEffect::PersistUsers]);
        assert_eq!(state.current_user.as_ref().expect("user").berries, 7500);

        // Replay is a silent no-op with no effects.
        let effects = reduce(
            &mut state,
            ShellAction::PurchaseItem { item_id: "1".into() },
            21,
        )
        .expect("replay");
        assert!(effects.is_empty());

        let effects = reduce(
            &mut state,
            ShellAction::DiscardItem { item_id: "1".into() },
            22,
        )
        .expect("discard");
        assert_eq!(effects, vec![ShellEffect::PersistUsers]);
        let user = state.current_user.as_ref().expect("user");
        assert_eq!(user.berries, 7500);
        assert!(!user.owns_item("1"));
    }

    #[test]
    fn applying_a_theme_emits_the_style_side_channel() {
        let mut state = state();
        reduce(&mut state, ShellAction::Register(request("robin")), 1).expect("register");
        login(&mut state, "robin");

        let effects = reduce(
            &mut state,
            ShellAction::SetTheme {
                theme_id: "piratas".into(),
            },
            30,
        )
        .expect("theme");
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], ShellEffect::PersistUsers);
        assert!(matches!(
            &effects[1],
            ShellEffect::ApplyThemeStyle(style) if style.accent == "#f0b429"
        ));
    }

    #[test]
    fn pushed_toasts_schedule_their_own_expiry() {
        let mut state = state();
        let effects = reduce(
            &mut state,
            ShellAction::PushToast {
                kind: ToastKind::Success,
                message: "Item comprado!".into(),
            },
            40,
        )
        .expect("toast");
        let toast_id = state.toasts[0].id;
        assert_eq!(
            effects,
            vec![ShellEffect::ScheduleToastExpiry {
                toast_id,
                duration_ms: TOAST_DURATION_MS,
            }]
        );
    }

    #[test]
    fn admin_catalog_actions_persist_their_slots() {
        let mut state = state();

        let effects = reduce(
            &mut state,
            ShellAction::DeleteStoreItem { item_id: "1".into() },
            50,
        )
        .expect("delete item");
        assert_eq!(effects, vec![ShellEffect::PersistStoreItems]);
        assert!(state.store_items.iter().all(|i| i.id != "1"));

        let mut settings = state.settings.clone();
        settings.maintenance_mode = true;
        let effects =
            reduce(&mut state, ShellAction::UpdateSettings(settings), 51).expect("settings");
        assert_eq!(effects, vec![ShellEffect::PersistSettings]);
        assert!(state.settings.maintenance_mode);

        let effects = reduce(&mut state, ShellAction::UpdateSeasonRewards(Vec::new()), 52)
            .expect("rewards");
        assert_eq!(effects, vec![ShellEffect::PersistSeasonRewards]);

        let effects = reduce(&mut state, ShellAction::UpdateCreditPacks(Vec::new()), 53)
            .expect("packs");
        assert_eq!(effects, vec![ShellEffect::PersistCreditPacks]);
    }

    #[test]
    fn privileged_mutations_against_unknown_users_emit_nothing() {
        let mut state = state();
        for action in [
            ShellAction::GiveBerries {
                user_id: "missing".into(),
                amount: 100,
            },
            ShellAction::GiveItem {
                user_id: "missing".into(),
                item_id: "1".into(),
            },
            ShellAction::SetUserLevel {
                user_id: "missing".into(),
                level: 5,
            },
            ShellAction::ToggleUserRole {
                user_id: "missing".into(),
            },
            ShellAction::DeleteUser {
                user_id: "missing".into(),
            },
        ] {
            let effects = reduce(&mut state, action, 60).expect("no-op");
            assert!(effects.is_empty());
        }
    }
}
