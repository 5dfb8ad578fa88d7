// Trade good categories, tiers and the item catalogue

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const AVAILABLE_TIERS: [u8; 5] = [4, 5, 6, 7, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Refine,
    Resource,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Refine => "refine",
            ItemKind::Resource => "resource",
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        match self {
            ItemKind::Refine => &[
                Category::Planks,
                Category::Leather,
                Category::Cloth,
                Category::MetalBar,
            ],
            ItemKind::Resource => &[
                Category::Ore,
                Category::Wood,
                Category::Fiber,
                Category::Hide,
            ],
        }
    }

    /// Every item id requested from the market for this kind, tier-major.
    pub fn catalog(&self) -> Vec<String> {
        AVAILABLE_TIERS
            .iter()
            .flat_map(|tier| {
                self.categories()
                    .iter()
                    .map(move |category| format!("T{}_{}", tier, category.token()))
            })
            .collect()
    }
}

impl FromStr for ItemKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refine" => Ok(ItemKind::Refine),
            "resource" => Ok(ItemKind::Resource),
            other => Err(ValidationError::UnknownItemKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Planks,
    Leather,
    Cloth,
    #[serde(rename = "METALBAR")]
    MetalBar,
    Ore,
    Wood,
    Fiber,
    Hide,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Planks,
        Category::Leather,
        Category::Cloth,
        Category::MetalBar,
        Category::Ore,
        Category::Wood,
        Category::Fiber,
        Category::Hide,
    ];

    /// Token as it appears inside market item ids.
    pub fn token(&self) -> &'static str {
        match self {
            Category::Planks => "PLANKS",
            Category::Leather => "LEATHER",
            Category::Cloth => "CLOTH",
            Category::MetalBar => "METALBAR",
            Category::Ore => "ORE",
            Category::Wood => "WOOD",
            Category::Fiber => "FIBER",
            Category::Hide => "HIDE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Planks => "PLANKS",
            Category::Leather => "LEATHERS",
            Category::Cloth => "CLOTHS",
            Category::MetalBar => "METAL BAR",
            Category::Ore => "ORE",
            Category::Wood => "WOOD",
            Category::Fiber => "FIBER",
            Category::Hide => "HIDE",
        }
    }

    /// Category named right after the tier token, e.g. `T5_METALBAR_LEVEL1@1`.
    pub fn from_item_id(item_id: &str) -> Option<Category> {
        let (tier_token, rest) = item_id.split_once('_')?;
        parse_tier_token(tier_token)?;
        Category::ALL
            .into_iter()
            .find(|category| rest.starts_with(category.token()))
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_uppercase();
        Category::ALL
            .into_iter()
            .find(|category| category.token() == token)
            .ok_or(ValidationError::UnknownCategory(token))
    }
}

/// Tier from the leading `T<digits>` token of an item id.
pub fn item_tier(item_id: &str) -> Option<u8> {
    let token = item_id.split('_').next()?;
    parse_tier_token(token)
}

fn parse_tier_token(token: &str) -> Option<u8> {
    let digits = token.strip_prefix('T')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
