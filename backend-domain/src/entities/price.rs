// Market price entities
// Records come straight from the market-data API (snake_case JSON)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Category, QualityLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub item_id: String,
    pub city: String,
    pub quality: u8,
    #[serde(default)]
    pub sell_price_min: u64,
    #[serde(default)]
    pub sell_price_max: u64,
    #[serde(default)]
    pub buy_price_min: u64,
    #[serde(default)]
    pub buy_price_max: u64,
    #[serde(default)]
    pub sell_price_min_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceGroup {
    pub item_id: String,
    pub quality: u8,
    pub tier: u8,
    pub category: Category,
    pub cities: Vec<PriceRecord>,
}

impl PriceGroup {
    pub fn new(item_id: String, quality: u8, tier: u8, category: Category) -> Self {
        Self {
            item_id,
            quality,
            tier,
            category,
            cities: Vec::new(),
        }
    }

    /// Lowest listed sell price; cities without a listing (price 0) are ignored.
    pub fn lowest_sell(&self) -> Option<u64> {
        self.listed_prices().min()
    }

    pub fn highest_sell(&self) -> Option<u64> {
        self.listed_prices().max()
    }

    fn listed_prices(&self) -> impl Iterator<Item = u64> + '_ {
        self.cities
            .iter()
            .map(|record| record.sell_price_min)
            .filter(|price| *price > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceBoard {
    pub groups: Vec<PriceGroup>,
}

impl PriceBoard {
    pub fn get(&self, item_id: &str, quality: u8) -> Option<&PriceGroup> {
        self.groups
            .iter()
            .find(|group| group.item_id == item_id && group.quality == quality)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceQuery {
    pub kind: Option<String>,
    /// Comma separated, e.g. `4,5,6`.
    pub tiers: Option<String>,
    /// Comma separated category tokens, e.g. `ORE,WOOD`.
    pub categories: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityPriceView {
    pub city: String,
    pub sell_price_min: Option<u64>,
    pub buy_price_max: u64,
    pub sell_price_min_date: Option<NaiveDateTime>,
    pub is_lowest: bool,
    pub is_highest: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceGroupView {
    pub item_id: String,
    pub quality: u8,
    pub quality_label: &'static str,
    pub tier: u8,
    pub category: Category,
    pub category_label: &'static str,
    pub lowest_sell: Option<u64>,
    pub highest_sell: Option<u64>,
    pub cities: Vec<CityPriceView>,
}

impl From<&PriceGroup> for PriceGroupView {
    fn from(group: &PriceGroup) -> Self {
        let lowest = group.lowest_sell();
        let highest = group.highest_sell();
        let cities = group
            .cities
            .iter()
            .map(|record| {
                let listed = (record.sell_price_min > 0).then_some(record.sell_price_min);
                CityPriceView {
                    city: record.city.clone(),
                    sell_price_min: listed,
                    buy_price_max: record.buy_price_max,
                    sell_price_min_date: record.sell_price_min_date,
                    is_lowest: listed.is_some() && listed == lowest,
                    is_highest: listed.is_some() && listed == highest && highest != lowest,
                }
            })
            .collect();
        Self {
            item_id: group.item_id.clone(),
            quality: group.quality,
            quality_label: QualityLevel::from(group.quality).as_str(),
            tier: group.tier,
            category: group.category,
            category_label: group.category.label(),
            lowest_sell: lowest,
            highest_sell: highest,
            cities,
        }
    }
}
