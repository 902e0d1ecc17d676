//! Account management: registration, authentication, secret hashing, and the
//! privileged master-panel mutations.
//!
//! Secrets are stored as salted SHA-256 digests in `s1$<salt>$<digest>` form.
//! Accounts created before the hashing migration still carry the old
//! reversible base64 encoding; [`verify_secret`] accepts it and
//! [`authenticate`] upgrades it in place on the next successful login.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::model::{Role, ShellState, User, DEFAULT_THEME, DEFAULT_WALLPAPER};
use crate::reducer::ShellError;

const SECRET_SCHEME_PREFIX: &str = "s1$";
/// Minimum accepted secret length, in characters.
pub const MIN_SECRET_LEN: usize = 4;

/// Shared password gating the admin editor surface.
///
/// Checked client-side only; cosmetic access control, not a security boundary.
const ADMIN_EDITOR_PASSWORD: &str = "grandline2024";

/// Checks the admin editor gate password.
pub fn verify_admin_password(input: &str) -> bool {
    input == ADMIN_EDITOR_PASSWORD
}

/// Hashes a plaintext secret with a fresh random salt.
pub fn hash_secret(plain: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    hash_secret_with_salt(plain, &hex::encode(salt))
}

fn hash_secret_with_salt(plain: &str, salt_hex: &str) -> String {
    let digest = Sha256::digest(format!("{salt_hex}{plain}").as_bytes());
    format!("{SECRET_SCHEME_PREFIX}{salt_hex}${}", hex::encode(digest))
}

/// Verifies a plaintext secret against its stored form.
pub fn verify_secret(plain: &str, stored: &str) -> bool {
    match stored.strip_prefix(SECRET_SCHEME_PREFIX) {
        Some(rest) => {
            let Some((salt_hex, _)) = rest.split_once('$') else {
                return false;
            };
            hash_secret_with_salt(plain, salt_hex) == stored
        }
        // Legacy reversible encoding, kept only as a login-time migration shim.
        None => BASE64.encode(plain) == stored,
    }
}

/// Returns whether a stored secret still uses the legacy reversible encoding.
pub fn is_legacy_secret(stored: &str) -> bool {
    !stored.starts_with(SECRET_SCHEME_PREFIX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Input for [`register`].
pub struct RegisterRequest {
    pub username: String,
    pub secret: String,
    pub confirm_secret: String,
    pub character_name: String,
    pub avatar: String,
}

/// Creates a new account, appends it to the user collection, and returns it.
///
/// New accounts start at level 1 with the settings-configured berry balance
/// and the default wallpaper and theme pre-granted.
///
/// # Errors
///
/// Returns [`ShellError::Validation`] for missing fields, short secrets, or a
/// confirmation mismatch, and [`ShellError::DuplicateUsername`] when the
/// username is already taken (case-sensitive exact match).
pub fn register(
    state: &mut ShellState,
    request: RegisterRequest,
    now_ms: u64,
) -> Result<User, ShellError> {
    if request.username.trim().is_empty()
        || request.secret.is_empty()
        || request.character_name.trim().is_empty()
        || request.avatar.is_empty()
    {
        return Err(ShellError::Validation("all fields are required".into()));
    }
    if request.secret.chars().count() < MIN_SECRET_LEN {
        return Err(ShellError::Validation(format!(
            "secret must have at least {MIN_SECRET_LEN} characters"
        )));
    }
    if request.secret != request.confirm_secret {
        return Err(ShellError::Validation(
            "secret confirmation does not match".into(),
        ));
    }
    if state.users.iter().any(|u| u.username == request.username) {
        return Err(ShellError::DuplicateUsername);
    }

    let user = User {
        id: format!("user-{now_ms}"),
        username: request.username,
        secret: hash_secret(&request.secret),
        character_name: request.character_name,
        avatar: request.avatar,
        role: Role::Player,
        berries: state.settings.initial_berries,
        level: 1,
        xp: 0,
        owned_items: Vec::new(),
        owned_wallpapers: vec![DEFAULT_WALLPAPER.to_string()],
        owned_themes: vec![DEFAULT_THEME.to_string()],
        active_wallpaper: DEFAULT_WALLPAPER.to_string(),
        active_theme: DEFAULT_THEME.to_string(),
        season_pass_level: 1,
        season_pass_premium: false,
        claimed_rewards: Vec::new(),
        created_at: now_ms,
    };
    state.users.push(user.clone());
    Ok(user)
}

/// Authenticates a username/secret pair against the stored user list.
///
/// Returns the matched user plus whether its stored secret was upgraded from
/// the legacy encoding (in which case the user list needs persisting).
///
/// # Errors
///
/// Returns [`ShellError::InvalidCredentials`] when no user matches and
/// [`ShellError::MaintenanceBlocked`] when maintenance mode is active and the
/// matched account is not a master.
pub fn authenticate(
    state: &mut ShellState,
    username: &str,
    secret: &str,
) -> Result<(User, bool), ShellError> {
    let Some(user) = state
        .users
        .iter()
        .find(|u| u.username == username && verify_secret(secret, &u.secret))
        .cloned()
    else {
        return Err(ShellError::InvalidCredentials);
    };

    if state.settings.maintenance_mode && user.role != Role::Master {
        return Err(ShellError::MaintenanceBlocked);
    }

    if is_legacy_secret(&user.secret) {
        tracing::warn!(username, "upgrading legacy secret encoding");
        let mut upgraded = user;
        upgraded.secret = hash_secret(secret);
        state.replace_user(upgraded.clone());
        return Ok((upgraded, true));
    }
    Ok((user, false))
}

/// Credits berries to a user's balance. No-op when the user does not exist.
pub fn give_berries(state: &mut ShellState, user_id: &str, amount: u64) -> bool {
    let Some(user) = state.find_user(user_id) else {
        return false;
    };
    let mut updated = user.clone();
    updated.berries = updated.berries.saturating_add(amount);
    state.replace_user(updated)
}

/// Grants an item to a user. Idempotent; no-op when the user does not exist
/// or already owns the item.
pub fn give_item(state: &mut ShellState, user_id: &str, item_id: &str) -> bool {
    let Some(user) = state.find_user(user_id) else {
        return false;
    };
    if user.owns_item(item_id) {
        return false;
    }
    let mut updated = user.clone();
    updated.owned_items.push(item_id.to_string());
    state.replace_user(updated)
}

/// Sets a user's display level. No-op when the user does not exist.
pub fn set_user_level(state: &mut ShellState, user_id: &str, level: u32) -> bool {
    let Some(user) = state.find_user(user_id) else {
        return false;
    };
    let mut updated = user.clone();
    updated.level = level;
    state.replace_user(updated)
}

/// Flips a user between the player and master roles.
pub fn toggle_role(state: &mut ShellState, user_id: &str) -> bool {
    let Some(user) = state.find_user(user_id) else {
        return false;
    };
    let mut updated = user.clone();
    updated.role = updated.role.toggled();
    state.replace_user(updated)
}

/// Replaces a user record wholesale (admin editor path).
pub fn update_user(state: &mut ShellState, user: User) -> bool {
    state.replace_user(user)
}

/// Deletes a user account.
///
/// The account of the active session can never delete itself; the guard lives
/// here rather than in the calling surface.
pub fn delete_user(state: &mut ShellState, user_id: &str) -> bool {
    if state
        .current_user
        .as_ref()
        .is_some_and(|cu| cu.id == user_id)
    {
        return false;
    }
    let before = state.users.len();
    state.users.retain(|u| u.id != user_id);
    state.users.len() != before
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog;

    fn empty_state() -> ShellState {
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
            character_name: "Roronoa".to_string(),
            avatar: "🗡️".to_string(),
        }
    }

    #[test]
    fn hashed_secrets_verify_and_are_salted() {
        let first = hash_secret("onepiece2024");
        let second = hash_secret("onepiece2024");
        assert!(verify_secret("onepiece2024", &first));
        assert!(verify_secret("onepiece2024", &second));
        assert!(!verify_secret("wrong", &first));
        assert_ne!(first, second, "salts must differ");
        assert!(!is_legacy_secret(&first));
    }

    #[test]
    fn legacy_encoded_secrets_still_verify() {
        let stored = BASE64.encode("onepiece2024");
        assert!(is_legacy_secret(&stored));
        assert!(verify_secret("onepiece2024", &stored));
        assert!(!verify_secret("wrong", &stored));
    }

    #[test]
    fn register_grants_defaults_and_starting_balance() {
        let mut state = empty_state();
        let user = register(&mut state, request("zoro"), 42).expect("register");

        assert_eq!(user.berries, state.settings.initial_berries);
        assert_eq!(user.level, 1);
        assert_eq!(user.owned_wallpapers, vec![DEFAULT_WALLPAPER.to_string()]);
        assert_eq!(user.owned_themes, vec![DEFAULT_THEME.to_string()]);
        assert_eq!(user.active_wallpaper, DEFAULT_WALLPAPER);
        assert!(user.claimed_rewards.is_empty());
        assert_eq!(user.created_at, 42);
        assert_eq!(state.users.len(), 1);
    }

    #[test]
    fn register_rejects_duplicate_username_without_side_effects() {
        let mut state = empty_state();
        register(&mut state, request("zoro"), 1).expect("first register");
        let before = state.clone();

        let err = register(&mut state, request("zoro"), 2).expect_err("duplicate");
        assert_eq!(err, ShellError::DuplicateUsername);
        assert_eq!(state, before);
    }

    #[test]
    fn register_validates_input() {
        let mut state = empty_state();

        let mut short = request("nami");
        short.secret = "abc".into();
        short.confirm_secret = "abc".into();
        assert!(matches!(
            register(&mut state, short, 1),
            Err(ShellError::Validation(_))
        ));

        let mut mismatch = request("nami");
        mismatch.confirm_secret = "different".into();
        assert!(matches!(
            register(&mut state, mismatch, 1),
            Err(ShellError::Validation(_))
        ));

        let mut blank = request("");
        blank.username = String::new();
        assert!(matches!(
            register(&mut state, blank, 1),
            Err(ShellError::Validation(_))
        ));
        assert!(state.users.is_empty());
    }

    #[test]
    fn authenticate_matches_exact_credentials() {
        let mut state = empty_state();
        register(&mut state, request("zoro"), 1).expect("register");

        let (user, upgraded) = authenticate(&mut state, "zoro", "nakama").expect("login");
        assert_eq!(user.username, "zoro");
        assert!(!upgraded);

        assert_eq!(
            authenticate(&mut state, "zoro", "wrong").expect_err("bad secret"),
            ShellError::InvalidCredentials
        );
        assert_eq!(
            authenticate(&mut state, "Zoro", "nakama").expect_err("case-sensitive"),
            ShellError::InvalidCredentials
        );
    }

    #[test]
    fn maintenance_mode_blocks_players_but_not_masters() {
        let mut state = empty_state();
        state.users.push(catalog::master_account(0));
        register(&mut state, request("zoro"), 1).expect("register");
        state.settings.maintenance_mode = true;

        assert_eq!(
            authenticate(&mut state, "zoro", "nakama").expect_err("blocked"),
            ShellError::MaintenanceBlocked
        );
        let (master, _) = authenticate(&mut state, "mestre", "onepiece2024").expect("master login");
        assert_eq!(master.role, Role::Master);
    }

    #[test]
    fn legacy_secret_is_upgraded_on_login() {
        let mut state = empty_state();
        register(&mut state, request("zoro"), 1).expect("register");
        state.users[0].secret = BASE64.encode("nakama");

        let (user, upgraded) = authenticate(&mut state, "zoro", "nakama").expect("login");
        assert!(upgraded);
        assert!(!is_legacy_secret(&user.secret));
        assert!(!is_legacy_secret(&state.users[0].secret));
        assert!(verify_secret("nakama", &state.users[0].secret));
    }

    #[test]
    fn give_item_is_idempotent_and_ignores_unknown_users() {
        let mut state = empty_state();
        let user = register(&mut state, request("zoro"), 1).expect("register");

        assert!(give_item(&mut state, &user.id, "4"));
        assert!(!give_item(&mut state, &user.id, "4"));
        assert_eq!(state.users[0].owned_items, vec!["4".to_string()]);
        assert!(!give_item(&mut state, "missing", "4"));
    }

    #[test]
    fn give_berries_and_set_level_update_session_snapshot() {
        let mut state = empty_state();
        let user = register(&mut state, request("zoro"), 1).expect("register");
        state.current_user = Some(user.clone());

        assert!(give_berries(&mut state, &user.id, 500));
        assert!(set_user_level(&mut state, &user.id, 7));
        let current = state.current_user.as_ref().expect("session user");
        assert_eq!(current.berries, state.settings.initial_berries + 500);
        assert_eq!(current.level, 7);
    }

    #[test]
    fn toggle_role_flips_between_player_and_master() {
        let mut state = empty_state();
        let user = register(&mut state, request("zoro"), 1).expect("register");

        assert!(toggle_role(&mut state, &user.id));
        assert_eq!(state.users[0].role, Role::Master);
        assert!(toggle_role(&mut state, &user.id));
        assert_eq!(state.users[0].role, Role::Player);
    }

    #[test]
    fn delete_user_refuses_the_active_session_account() {
        let mut state = empty_state();
        let zoro = register(&mut state, request("zoro"), 1).expect("register");
        let nami = register(&mut state, request("nami"), 2).expect("register");
        state.current_user = Some(zoro.clone());

        assert!(!delete_user(&mut state, &zoro.id));
        assert_eq!(state.users.len(), 2);

        assert!(delete_user(&mut state, &nami.id));
        assert_eq!(state.users.len(), 1);
        assert!(!delete_user(&mut state, &nami.id));
    }

    #[test]
    fn admin_gate_accepts_only_the_shared_password() {
        assert!(verify_admin_password("grandline2024"));
        assert!(!verify_admin_password(""));
        assert!(!verify_admin_password("grandline"));
    }
}
