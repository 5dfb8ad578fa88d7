use std::collections::HashSet;
use std::str::FromStr;

use backend_domain::services::group_prices;
use backend_domain::{
    Category, ItemKind, PriceGroupView, PriceQuery, ValidationError, AVAILABLE_TIERS,
};
use tracing::{info, warn};

use crate::{AppError, AppState};

#[derive(Debug, Clone)]
pub enum PriceView {
    Ready {
        kind: ItemKind,
        groups: Vec<PriceGroupView>,
    },
    /// The market API returned nothing usable.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFilter {
    pub kind: ItemKind,
    pub tiers: HashSet<u8>,
    pub categories: HashSet<Category>,
}

impl PriceFilter {
    /// Empty tier or category lists select everything available for the kind.
    pub fn parse(query: &PriceQuery) -> Result<Self, ValidationError> {
        let kind = match non_empty(query.kind.as_deref()) {
            Some(raw) => ItemKind::from_str(raw)?,
            None => ItemKind::Refine,
        };

        let mut tiers = HashSet::new();
        for raw in split_list(query.tiers.as_deref()) {
            let tier = raw
                .trim_start_matches(['T', 't'])
                .parse::<u8>()
                .ok()
                .filter(|tier| AVAILABLE_TIERS.contains(tier))
                .ok_or_else(|| ValidationError::InvalidTier(raw.to_string()))?;
            tiers.insert(tier);
        }
        if tiers.is_empty() {
            tiers.extend(AVAILABLE_TIERS);
        }

        let mut categories = HashSet::new();
        for raw in split_list(query.categories.as_deref()) {
            categories.insert(Category::from_str(raw)?);
        }
        if categories.is_empty() {
            categories.extend(kind.categories().iter().copied());
        }

        Ok(Self {
            kind,
            tiers,
            categories,
        })
    }
}

pub async fn price_board(state: &AppState, query: PriceQuery) -> Result<PriceView, AppError> {
    let filter = PriceFilter::parse(&query)?;
    let item_ids = filter.kind.catalog();

    let records = state
        .price_source
        .fetch_prices(
            &item_ids,
            &state.config.price_locations,
            &state.config.price_qualities,
        )
        .await;
    state.metrics.record_price_fetch(records.is_some());

    let Some(records) = records else {
        warn!(kind = filter.kind.as_str(), "price data unavailable");
        return Ok(PriceView::Unavailable);
    };

    let board = group_prices(&records, &filter.tiers, &filter.categories);
    info!(
        kind = filter.kind.as_str(),
        records = records.len(),
        groups = board.len(),
        "price board built"
    );
    Ok(PriceView::Ready {
        kind: filter.kind,
        groups: board.groups.iter().map(PriceGroupView::from).collect(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}
