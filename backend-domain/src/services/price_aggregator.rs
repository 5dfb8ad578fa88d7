use std::collections::{HashMap, HashSet};

use crate::entities::{PriceBoard, PriceGroup, PriceRecord};
use crate::value_objects::{item_tier, Category};

/// Groups market records by `(item_id, quality)`.
///
/// Records whose tier or category cannot be read from the item id, or which fall
/// outside the filters, are dropped. Groups and the cities inside them keep the
/// order in which they were first seen.
pub fn group_prices(
    records: &[PriceRecord],
    tiers: &HashSet<u8>,
    categories: &HashSet<Category>,
) -> PriceBoard {
    let mut groups: Vec<PriceGroup> = Vec::new();
    let mut index: HashMap<(&str, u8), usize> = HashMap::new();

    for record in records {
        let Some(tier) = item_tier(&record.item_id) else {
            continue;
        };
        let Some(category) = Category::from_item_id(&record.item_id) else {
            continue;
        };
        if !tiers.contains(&tier) || !categories.contains(&category) {
            continue;
        }

        let key = (record.item_id.as_str(), record.quality);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(PriceGroup::new(
                record.item_id.clone(),
                record.quality,
                tier,
                category,
            ));
            groups.len() - 1
        });
        groups[slot].cities.push(record.clone());
    }

    PriceBoard { groups }
}
