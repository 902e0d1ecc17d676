//! Economy transitions: item purchase/discard, cosmetic application, season
//! reward claiming, and the premium pass upgrade.
//!
//! Every debit path checks the balance first, so a balance can never go
//! negative. Ineligible purchases and claims are silent no-ops; the
//! presentation layer pre-validates and owns the messaging.

use crate::catalog;
use crate::model::{reward_key, RewardKind, ShellState, ThemeStyle, PREMIUM_UPGRADE_COST};
use crate::reducer::ShellError;

/// Purchases a store item for the signed-in user.
///
/// Returns `true` when the purchase happened. Unknown items, items already
/// owned, an unaffordable price, or a logged-out session all leave the state
/// unchanged.
pub fn purchase_item(state: &mut ShellState, item_id: &str) -> bool {
    let Some(user) = state.current_user.as_ref() else {
        return false;
    };
    let Some(item) = state.store_items.iter().find(|i| i.id == item_id) else {
        return false;
    };
    if user.owns_item(item_id) || user.berries < item.price {
        return false;
    }
    let mut updated = user.clone();
    updated.berries -= item.price;
    updated.owned_items.push(item.id.clone());
    state.replace_user(updated)
}

/// Removes an item from the signed-in user's inventory. No refund; idempotent.
pub fn discard_item(state: &mut ShellState, item_id: &str) -> bool {
    let Some(user) = state.current_user.as_ref() else {
        return false;
    };
    if !user.owns_item(item_id) {
        return false;
    }
    let mut updated = user.clone();
    updated.owned_items.retain(|id| id != item_id);
    state.replace_user(updated)
}

/// Applies an owned wallpaper as the active selection.
///
/// Returns `false` for a logged-out session.
///
/// # Errors
///
/// Returns [`ShellError::NotOwned`] when the wallpaper is not in the user's
/// owned set.
pub fn apply_wallpaper(state: &mut ShellState, wallpaper_id: &str) -> Result<bool, ShellError> {
    let Some(user) = state.current_user.as_ref() else {
        return Ok(false);
    };
    if !user.owns_wallpaper(wallpaper_id) {
        return Err(ShellError::NotOwned);
    }
    let mut updated = user.clone();
    updated.active_wallpaper = wallpaper_id.to_string();
    Ok(state.replace_user(updated))
}

/// Applies an owned theme as the active selection.
///
/// On success returns the style values the presentation layer should
/// propagate, when the theme is known to the catalog.
///
/// # Errors
///
/// Returns [`ShellError::NotOwned`] when the theme is not in the user's owned
/// set.
pub fn apply_theme(state: &mut ShellState, theme_id: &str) -> Result<Option<ThemeStyle>, ShellError> {
    let Some(user) = state.current_user.as_ref() else {
        return Ok(None);
    };
    if !user.owns_theme(theme_id) {
        return Err(ShellError::NotOwned);
    }
    let mut updated = user.clone();
    updated.active_theme = theme_id.to_string();
    state.replace_user(updated);
    Ok(catalog::theme_by_id(theme_id).map(|theme| ThemeStyle::from(&theme)))
}

/// Claims a season reward for the signed-in user.
///
/// Returns `true` when the reward was granted. Duplicate claims, levels above
/// the user's season-pass level, premium-track claims without the premium
/// unlock, and undefined (level, track) pairs are all silent no-ops.
pub fn claim_reward(state: &mut ShellState, level: u32, premium: bool) -> bool {
    let Some(user) = state.current_user.as_ref() else {
        return false;
    };
    let key = reward_key(level, premium);
    if user.claimed_rewards.contains(&key)
        || level > user.season_pass_level
        || (premium && !user.season_pass_premium)
    {
        return false;
    }
    let Some(reward) = state
        .season_rewards
        .iter()
        .find(|r| r.level == level && r.premium == premium)
        .cloned()
    else {
        return false;
    };

    let mut updated = user.clone();
    updated.claimed_rewards.push(key);
    match reward.kind {
        RewardKind::Berries => {
            let amount: u64 = reward.value.parse().unwrap_or_default();
            updated.berries = updated.berries.saturating_add(amount);
        }
        RewardKind::Item => {
            if !updated.owns_item(&reward.value) {
                updated.owned_items.push(reward.value.clone());
            }
        }
        RewardKind::Wallpaper => {
            if !updated.owns_wallpaper(&reward.value) {
                updated.owned_wallpapers.push(reward.value.clone());
            }
        }
        RewardKind::Theme => {
            if !updated.owns_theme(&reward.value) {
                updated.owned_themes.push(reward.value.clone());
            }
        }
        // Declared in the reward table but has no defined effect yet.
        RewardKind::Title => {}
    }
    state.replace_user(updated)
}

/// Unlocks the premium season-pass track for a fixed berry cost.
///
/// Not reversible by any shell operation. Returns `false` for a logged-out
/// session.
///
/// # Errors
///
/// Returns [`ShellError::InsufficientFunds`] when the balance is below
/// [`PREMIUM_UPGRADE_COST`].
pub fn upgrade_premium(state: &mut ShellState) -> Result<bool, ShellError> {
    let Some(user) = state.current_user.as_ref() else {
        return Ok(false);
    };
    if user.berries < PREMIUM_UPGRADE_COST {
        return Err(ShellError::InsufficientFunds);
    }
    let mut updated = user.clone();
    updated.berries -= PREMIUM_UPGRADE_COST;
    updated.season_pass_premium = true;
    Ok(state.replace_user(updated))
}
