//! Static content catalogs consumed by the shell: store items, cosmetics,
//! credit packs, default settings, and the generated season reward table.
//!
//! These are data fixtures, not behavior; persistence seeds them into their
//! slots on first boot and the admin editor may replace them afterwards.

use std::collections::BTreeMap;

use crate::accounts::hash_secret;
use crate::model::{
    AppId, CreditPack, Rarity, RewardKind, Role, SeasonReward, Settings, StoreItem, ThemeDef, User,
    WallpaperDef, SEASON_PASS_MAX_LEVEL,
};

fn stats(entries: &[(&str, u8)]) -> BTreeMap<String, u8> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

fn item(
    id: &str,
    name: &str,
    category: &str,
    emoji: &str,
    price: u64,
    rarity: Rarity,
    description: &str,
    item_stats: &[(&str, u8)],
) -> StoreItem {
    StoreItem {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        emoji: emoji.to_string(),
        price,
        rarity,
        description: description.to_string(),
        stats: stats(item_stats),
    }
}

/// The built-in purchasable item catalog.
pub fn default_store_items() -> Vec<StoreItem> {
    vec![
        item(
            "1",
            "Espada Wado Ichimonji",
            "Armas",
            "⚔️",
            2500,
            Rarity::Epico,
            "A espada branca de Kuina, herdada por Zoro. Forjada com aço especial que nunca perde o fio, carrega o peso de dois sonhos em sua lâmina.",
            &[("Ataque", 85), ("Velocidade", 70), ("Durabilidade", 90)],
        ),
        item(
            "2",
            "Fruta Gomu Gomu no Mi",
            "Frutas do Diabo",
            "🍇",
            8000,
            Rarity::Lendario,
            "Fruta Paramecia que transforma o corpo em borracha pura. Imunidade a trovões e balas, mas o usuário não consegue nadar.",
            &[("Poder", 95), ("Resistência", 80), ("Flexibilidade", 100)],
        ),
        item(
            "3",
            "Thousand Sunny",
            "Navios",
            "⛵",
            15000,
            Rarity::Lendario,
            "O orgulho dos Chapéus de Palha, construído com Madeira Adam por Franky. Equipado com Coup de Burst e Soldier Dock System.",
            &[("Velocidade", 88), ("Resistência", 95), ("Capacidade", 100)],
        ),
        item(
            "4",
            "Chapéu de Palha de Shanks",
            "Acessórios",
            "👒",
            500,
            Rarity::Lendario,
            "O símbolo do sonho de Luffy. Um simples chapéu de palha que carrega o peso de uma promessa entre piratas.",
            &[],
        ),
        item(
            "5",
            "Fruta Mera Mera no Mi",
            "Frutas do Diabo",
            "🔥",
            6000,
            Rarity::Epico,
            "Fruta Logia do fogo. O usuário se torna fogo vivo, capaz de criar, controlar e se transformar em chamas.",
            &[("Poder", 90), ("Calor", 100), ("Mobilidade", 75)],
        ),
        item(
            "6",
            "Clima Tact Perfeito",
            "Armas",
            "🌩️",
            1800,
            Rarity::Raro,
            "Versão aprimorada da arma de Nami. Capaz de criar mini-climas, relâmpagos e até tornados localizados.",
            &[("Poder", 70), ("Utilidade", 95), ("Alcance", 85)],
        ),
        item(
            "7",
            "Armadura Franky Shogun",
            "Especiais",
            "🤖",
            12000,
            Rarity::Epico,
            "Exoesqueleto robótico gigante construído em Wano. Funciona com cola e possui arsenal de armas embutidas.",
            &[("Força", 100), ("Armadura", 95), ("Estilo", 100)],
        ),
        item(
            "8",
            "Rumble Ball",
            "Especiais",
            "💊",
            300,
            Rarity::Incomum,
            "Droga médica criada por Chopper. Altera temporariamente a frequência de ressonância da Fruta do Diabo por 3 minutos.",
            &[("Boost", 80)],
        ),
        item(
            "9",
            "Sabre de Hawkins",
            "Armas",
            "🔮",
            3200,
            Rarity::Raro,
            "Espada mágica do Basil Hawkins com poderes de carta de tarô. Transfere dano para palhas de vodu.",
            &[("Ataque", 78), ("Magia", 92), ("Sorte", 65)],
        ),
        item(
            "10",
            "Fruta Hito Hito no Mi",
            "Frutas do Diabo",
            "🦌",
            4500,
            Rarity::Epico,
            "Fruta Zoan humana consumida por Tony Tony Chopper. Permite transformação entre humano, híbrido e animal.",
            &[("Transformações", 7), ("Inteligência", 100), ("Medicina", 95)],
        ),
    ]
}

/// The built-in wallpaper catalog.
pub fn wallpapers() -> Vec<WallpaperDef> {
    let defs = [
        ("abyssal", "Abyssal", "linear-gradient(135deg, #050810 0%, #0a1420 40%, #060b18 100%)", false),
        ("skypiea", "Skypiea", "linear-gradient(135deg, #0f0800 0%, #6b4f0e 40%, #c49a1a 80%, #f0c040 100%)", true),
        ("marineford", "Marineford", "linear-gradient(160deg, #0d0000 0%, #5c0a0a 50%, #8b1a1a 80%, #0d0000 100%)", true),
        ("sunny", "Thousand Sunny", "linear-gradient(135deg, #071a0d 0%, #0f3d1f 45%, #1a6b35 70%, #d4831a 100%)", true),
        ("fishman", "Fishman Island", "linear-gradient(135deg, #000d1a 0%, #003355 40%, #005f7a 70%, #00a0b0 100%)", true),
        ("wano", "Wano", "linear-gradient(160deg, #120800 0%, #6b2800 30%, #b85a00 60%, #8b0000 100%)", true),
        ("elbaf", "Elbaf", "linear-gradient(135deg, #08001a 0%, #350070 40%, #6000c0 65%, #00c8a0 100%)", true),
        ("new-world", "Novo Mundo", "linear-gradient(160deg, #000208 0%, #01050f 30%, #050018 65%, #000208 100%)", true),
        ("laugh-tale", "Laugh Tale", "radial-gradient(ellipse at center, #1a0f00 0%, #4a2800 40%, #0a0a0a 100%)", true),
    ];
    defs.iter()
        .map(|(id, name, gradient, locked)| WallpaperDef {
            id: id.to_string(),
            name: name.to_string(),
            gradient: gradient.to_string(),
            locked: *locked,
        })
        .collect()
}

/// The built-in theme catalog.
pub fn themes() -> Vec<ThemeDef> {
    let defs = [
        ("piratas", "Piratas", "O ouro dos Chapéus de Palha", "#f0b429", "#080b14", "#0f1629", "rgba(240,180,41,0.15)", false),
        ("marinha", "Marinha", "Justiça Absoluta", "#3b82f6", "#050e1c", "#0a1628", "rgba(59,130,246,0.15)", true),
        ("shichibukai", "Shichibukai", "Os Sete Senhores", "#a855f7", "#09060f", "#130d1e", "rgba(168,85,247,0.15)", true),
        ("yonkou", "Yonkou", "Imperadores do Mar", "#ef4444", "#0e0404", "#1a0808", "rgba(239,68,68,0.15)", true),
        ("revolucionario", "Revolucionário", "Exército da Liberdade", "#22c55e", "#05100a", "#0a1a0f", "rgba(34,197,94,0.15)", true),
        ("classico", "Clássico", "Preto e branco atemporal", "#e5e7eb", "#080808", "#141414", "rgba(229,231,235,0.15)", true),
    ];
    defs.iter()
        .map(
            |(id, name, description, accent, bg, surface, border, locked)| ThemeDef {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                accent: accent.to_string(),
                bg: bg.to_string(),
                surface: surface.to_string(),
                border: border.to_string(),
                locked: *locked,
            },
        )
        .collect()
}

/// Looks up a theme definition by id in the built-in catalog.
pub fn theme_by_id(theme_id: &str) -> Option<ThemeDef> {
    themes().into_iter().find(|t| t.id == theme_id)
}

/// The built-in credit pack catalog for the credits store.
pub fn default_credit_packs() -> Vec<CreditPack> {
    let defs: [(&str, &str, u64, u64, &str, &str, bool, bool); 4] = [
        ("pack-1", "Punhado de Berries", 1000, 0, "R$ 4,90", "🪙", false, false),
        ("pack-2", "Saco de Berries", 5000, 500, "R$ 19,90", "💰", true, false),
        ("pack-3", "Baú de Berries", 12000, 2000, "R$ 39,90", "🧰", false, false),
        ("pack-4", "Tesouro de Roger", 30000, 8000, "R$ 79,90", "👑", false, true),
    ];
    defs.iter()
        .map(
            |(id, name, berries, bonus, price, emoji, popular, best_value)| CreditPack {
                id: id.to_string(),
                name: name.to_string(),
                berries: *berries,
                bonus: *bonus,
                price: price.to_string(),
                emoji: emoji.to_string(),
                popular: *popular,
                best_value: *best_value,
            },
        )
        .collect()
}

/// The built-in global settings.
pub fn default_settings() -> Settings {
    Settings {
        os_name: "OLD AGE OS".to_string(),
        subtitle: "v1.0 — Grand Line Edition".to_string(),
        welcome_message: "Bem-vindo ao Grand Line, Nakama!".to_string(),
        maintenance_mode: false,
        initial_berries: 10000,
        season_name: "Temporada: Wano Arc".to_string(),
        season_description: "A batalha pela libertação de Wano começa agora!".to_string(),
    }
}

/// The seeded master account. Created on first boot and re-seeded whenever the
/// well-known username is missing from the stored user list.
pub fn master_account(now_ms: u64) -> User {
    User {
        id: "master-001".to_string(),
        username: crate::model::MASTER_USERNAME.to_string(),
        secret: hash_secret("onepiece2024"),
        character_name: "Game Master".to_string(),
        avatar: "👑".to_string(),
        role: Role::Master,
        berries: 999_999,
        level: 100,
        xp: 0,
        owned_items: Vec::new(),
        owned_wallpapers: wallpapers().into_iter().map(|w| w.id).collect(),
        owned_themes: themes().into_iter().map(|t| t.id).collect(),
        active_wallpaper: crate::model::DEFAULT_WALLPAPER.to_string(),
        active_theme: crate::model::DEFAULT_THEME.to_string(),
        season_pass_level: SEASON_PASS_MAX_LEVEL,
        season_pass_premium: true,
        claimed_rewards: Vec::new(),
        created_at: now_ms,
    }
}

fn reward(level: u32, kind: RewardKind, value: &str, premium: bool) -> SeasonReward {
    SeasonReward {
        level,
        kind,
        value: value.to_string(),
        premium,
    }
}

/// Generates the default 100-level two-track season reward table.
///
/// Milestone free-track levels grant items in a deterministic rotation through
/// the item catalog so the generated table is reproducible.
pub fn generate_season_rewards() -> Vec<SeasonReward> {
    let items = default_store_items();
    let mut rewards = Vec::with_capacity(SEASON_PASS_MAX_LEVEL as usize * 2);
    for level in 1..=SEASON_PASS_MAX_LEVEL {
        if level % 10 == 0 {
            let index = (level / 10 - 1) as usize % items.len();
            rewards.push(reward(level, RewardKind::Item, &items[index].id, false));
        } else if level % 5 == 0 {
            rewards.push(reward(level, RewardKind::Berries, "1000", false));
        } else {
            let amount = (100 + level * 10).to_string();
            rewards.push(reward(level, RewardKind::Berries, &amount, false));
        }

        if level % 10 == 0 {
            let milestone = match level {
                20 => Some((RewardKind::Wallpaper, "skypiea")),
                40 => Some((RewardKind::Theme, "marinha")),
                60 => Some((RewardKind::Wallpaper, "wano")),
                80 => Some((RewardKind::Theme, "shichibukai")),
                100 => Some((RewardKind::Wallpaper, "laugh-tale")),
                _ => None,
            };
            match milestone {
                Some((kind, value)) => rewards.push(reward(level, kind, value, true)),
                None => rewards.push(reward(level, RewardKind::Berries, "2000", true)),
            }
        } else if level % 5 == 0 {
            rewards.push(reward(level, RewardKind::Berries, "500", true));
        } else {
            let amount = (200 + level * 5).to_string();
            rewards.push(reward(level, RewardKind::Berries, &amount, true));
        }
    }
    rewards
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Launcher metadata for one shell application.
pub struct AppDefinition {
    pub id: AppId,
    pub title: &'static str,
    pub emoji: &'static str,
    pub gradient: &'static str,
    pub master_only: bool,
}

/// The applications shown on the desktop, in launcher order.
pub fn app_definitions() -> Vec<AppDefinition> {
    let gradient = |id: AppId| match id {
        AppId::Store => "linear-gradient(135deg, #1a3a1a, #2d6a2d)",
        AppId::Inventory => "linear-gradient(135deg, #1a1a3a, #2d2d8a)",
        AppId::SeasonPass => "linear-gradient(135deg, #3a1a1a, #8a2d2d)",
        AppId::Wallpapers => "linear-gradient(135deg, #1a2a3a, #2d4a6a)",
        AppId::Themes => "linear-gradient(135deg, #2a1a3a, #5a2d8a)",
        AppId::MasterPanel => "linear-gradient(135deg, #3a2a00, #8a6400)",
        AppId::Credits => "linear-gradient(135deg, #1a2a00, #4a6a00)",
        AppId::AdminEditor => "linear-gradient(135deg, #2a2a2a, #4a4a4a)",
    };
    [
        AppId::Store,
        AppId::Inventory,
        AppId::SeasonPass,
        AppId::Wallpapers,
        AppId::Themes,
        AppId::MasterPanel,
        AppId::Credits,
        AppId::AdminEditor,
    ]
    .into_iter()
    .map(|id| AppDefinition {
        id,
        title: id.title(),
        emoji: id.emoji(),
        gradient: gradient(id),
        master_only: id.master_only(),
    })
    .collect()
}
