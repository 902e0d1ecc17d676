//! Domain model for the shell runtime: users, catalogs, windows, and
//! session-scoped transient state.
//!
//! Persisted types keep the JSON field names of the stored slot format
//! (camelCase) so existing localStorage data keeps loading across releases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed berry cost of the premium season-pass upgrade.
pub const PREMIUM_UPGRADE_COST: u64 = 3000;
/// Wallpaper granted to every new account.
pub const DEFAULT_WALLPAPER: &str = "abyssal";
/// Theme granted to every new account.
pub const DEFAULT_THEME: &str = "piratas";
/// Well-known username of the seeded master account.
pub const MASTER_USERNAME: &str = "mestre";
/// Highest season-pass level on either reward track.
pub const SEASON_PASS_MAX_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Account privilege role.
pub enum Role {
    /// Regular account.
    Player,
    /// Privileged account with access to the master panel.
    Master,
}

impl Role {
    /// Returns the opposite role.
    pub fn toggled(self) -> Self {
        match self {
            Self::Player => Self::Master,
            Self::Master => Self::Player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A persisted account: identity, economy, ownership, and season-pass state.
pub struct User {
    pub id: String,
    pub username: String,
    /// Stored secret in `s1$<salt>$<digest>` form (or the legacy reversible
    /// encoding for accounts created before the hashing migration).
    #[serde(rename = "password")]
    pub secret: String,
    pub character_name: String,
    pub avatar: String,
    pub role: Role,
    pub berries: u64,
    pub level: u32,
    pub xp: u32,
    pub owned_items: Vec<String>,
    pub owned_wallpapers: Vec<String>,
    pub owned_themes: Vec<String>,
    pub active_wallpaper: String,
    pub active_theme: String,
    pub season_pass_level: u32,
    pub season_pass_premium: bool,
    /// Composite `<level>-<p|f>` keys; grows monotonically, never double-granted.
    pub claimed_rewards: Vec<String>,
    pub created_at: u64,
}

impl User {
    /// Returns whether the user owns the given store item.
    pub fn owns_item(&self, item_id: &str) -> bool {
        self.owned_items.iter().any(|id| id == item_id)
    }

    /// Returns whether the user owns the given wallpaper.
    pub fn owns_wallpaper(&self, wallpaper_id: &str) -> bool {
        self.owned_wallpapers.iter().any(|id| id == wallpaper_id)
    }

    /// Returns whether the user owns the given theme.
    pub fn owns_theme(&self, theme_id: &str) -> bool {
        self.owned_themes.iter().any(|id| id == theme_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
/// Store item rarity, ordered from common to legendary. Display emphasis only.
pub enum Rarity {
    #[serde(rename = "Comum")]
    Comum,
    #[serde(rename = "Incomum")]
    Incomum,
    #[serde(rename = "Raro")]
    Raro,
    #[serde(rename = "Épico")]
    Epico,
    #[serde(rename = "Lendário")]
    Lendario,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A purchasable catalog item.
pub struct StoreItem {
    pub id: String,
    pub name: String,
    /// Open-ended category label ("Armas", "Navios", ...).
    pub category: String,
    pub emoji: String,
    pub price: u64,
    pub rarity: Rarity,
    pub description: String,
    /// Named display stats on a 0-100 scale; rendering-only.
    pub stats: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A berry pack sold in the credits store. `price` is an opaque display string.
pub struct CreditPack {
    pub id: String,
    pub name: String,
    pub berries: u64,
    pub bonus: u64,
    pub price: String,
    pub emoji: String,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub best_value: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Payload kind carried by a season reward.
pub enum RewardKind {
    /// Berries credited to the balance; `value` holds the numeric string.
    Berries,
    /// A store item id granted to the owned set.
    Item,
    /// A wallpaper id granted to the owned set.
    Wallpaper,
    /// A theme id granted to the owned set.
    Theme,
    /// Declared but has no effect; kept as a no-op pending product definition.
    Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One entry of the two-track season reward ladder, keyed by (level, track).
pub struct SeasonReward {
    pub level: u32,
    #[serde(rename = "type")]
    pub kind: RewardKind,
    pub value: String,
    /// `true` for the premium track, `false` for the free track.
    pub premium: bool,
}

/// Builds the composite claimed-reward key for a (level, track) pair.
pub fn reward_key(level: u32, premium: bool) -> String {
    format!("{level}-{}", if premium { 'p' } else { 'f' })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Global shell configuration.
pub struct Settings {
    pub os_name: String,
    pub subtitle: String,
    pub welcome_message: String,
    pub maintenance_mode: bool,
    /// Starting berry balance for new accounts.
    pub initial_berries: u64,
    pub season_name: String,
    pub season_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Session-unique window identifier.
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// The applications known to the shell.
pub enum AppId {
    #[serde(rename = "loja")]
    Store,
    #[serde(rename = "estoque")]
    Inventory,
    #[serde(rename = "passe")]
    SeasonPass,
    #[serde(rename = "wallpaper")]
    Wallpapers,
    #[serde(rename = "temas")]
    Themes,
    #[serde(rename = "mestre")]
    MasterPanel,
    #[serde(rename = "creditos")]
    Credits,
    #[serde(rename = "admin-editor")]
    AdminEditor,
}

impl AppId {
    /// Default window title for the app.
    pub fn title(self) -> &'static str {
        match self {
            Self::Store => "Loja",
            Self::Inventory => "Estoque",
            Self::SeasonPass => "Passe de Temporada",
            Self::Wallpapers => "Papel de Parede",
            Self::Themes => "Temas",
            Self::MasterPanel => "Painel Mestre",
            Self::Credits => "Loja de Créditos",
            Self::AdminEditor => "Editor Admin",
        }
    }

    /// Default window emoji for the app.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Store => "🏪",
            Self::Inventory => "🎒",
            Self::SeasonPass => "🎫",
            Self::Wallpapers => "🖼️",
            Self::Themes => "🎨",
            Self::MasterPanel => "👑",
            Self::Credits => "💎",
            Self::AdminEditor => "🛠️",
        }
    }

    /// Default window size (width, height) for the app.
    pub fn default_size(self) -> (i32, i32) {
        match self {
            Self::Store => (900, 600),
            Self::Inventory => (800, 550),
            Self::SeasonPass => (850, 500),
            Self::Wallpapers => (750, 500),
            Self::Themes => (700, 500),
            Self::MasterPanel => (950, 650),
            Self::Credits => (700, 520),
            Self::AdminEditor => (900, 600),
        }
    }

    /// Whether the app is reachable only by master accounts.
    pub fn master_only(self) -> bool {
        matches!(self, Self::MasterPanel)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// An open application window. Session-scoped; never persisted.
pub struct AppWindow {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub emoji: String,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Toast severity.
pub enum ToastKind {
    Success,
    Error,
    Info,
    Reward,
    Levelup,
}

/// Fixed lifetime of a toast in milliseconds.
pub const TOAST_DURATION_MS: u32 = 4000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A transient self-expiring message.
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A session-scoped notification log entry, newest first.
pub struct Notification {
    pub id: u64,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub timestamp_ms: u64,
    /// Unread marker. No shell operation flips this yet; kept for the
    /// presentation layer.
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A wallpaper definition from the cosmetic catalog.
pub struct WallpaperDef {
    pub id: String,
    pub name: String,
    pub gradient: String,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A theme definition from the cosmetic catalog.
pub struct ThemeDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub accent: String,
    pub bg: String,
    pub surface: String,
    pub border: String,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Style values the presentation layer derives when a theme is applied.
pub struct ThemeStyle {
    pub accent: String,
    pub bg: String,
    pub surface: String,
    pub border: String,
}

impl From<&ThemeDef> for ThemeStyle {
    fn from(theme: &ThemeDef) -> Self {
        Self {
            accent: theme.accent.clone(),
            bg: theme.bg.clone(),
            surface: theme.surface.clone(),
            border: theme.border.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// The full in-memory shell snapshot owned by the session orchestrator.
pub struct ShellState {
    pub booted: bool,
    /// Snapshot of the signed-in user; refreshed whenever the matching entry
    /// in `users` is replaced.
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub store_items: Vec<StoreItem>,
    pub credit_packs: Vec<CreditPack>,
    pub settings: Settings,
    pub season_rewards: Vec<SeasonReward>,
    pub windows: Vec<AppWindow>,
    pub toasts: Vec<Toast>,
    pub notifications: Vec<Notification>,
    pub next_window_id: u64,
    /// Rotating counter driving the cascaded placement of new windows.
    pub window_cascade: u64,
    pub next_toast_id: u64,
    pub next_notification_id: u64,
}

impl ShellState {
    /// Builds an empty logged-out state over the given catalogs.
    pub fn new(
        users: Vec<User>,
        store_items: Vec<StoreItem>,
        credit_packs: Vec<CreditPack>,
        settings: Settings,
        season_rewards: Vec<SeasonReward>,
    ) -> Self {
        Self {
            booted: false,
            current_user: None,
            users,
            store_items,
            credit_packs,
            settings,
            season_rewards,
            windows: Vec::new(),
            toasts: Vec::new(),
            notifications: Vec::new(),
            next_window_id: 1,
            window_cascade: 0,
            next_toast_id: 1,
            next_notification_id: 1,
        }
    }

    /// Looks up a user by id.
    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Replaces the matching entry in `users` and refreshes the session
    /// snapshot when the signed-in user was the one replaced.
    ///
    /// Returns `false` when no user with the same id exists.
    pub fn replace_user(&mut self, updated: User) -> bool {
        let Some(slot) = self.users.iter_mut().find(|u| u.id == updated.id) else {
            return false;
        };
        *slot = updated.clone();
        if self
            .current_user
            .as_ref()
            .is_some_and(|cu| cu.id == updated.id)
        {
            self.current_user = Some(updated);
        }
        true
    }

    /// Highest z-index among open windows, or 0 when none are open.
    pub fn max_z_index(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Looks up an open window by id.
    pub fn find_window(&self, window_id: WindowId) -> Option<&AppWindow> {
        self.windows.iter().find(|w| w.id == window_id)
    }
}
