//! Matching helpers shared across the category-specific evaluators.

use seedscan_core::clause::ItemValue;
use seedscan_core::{Edition, Rarity, Sticker};

pub fn matches_named_or_rarity(value: &ItemValue, id: &str, rarity: Rarity) -> bool {
    match value {
        ItemValue::Named(name) => name.eq_ignore_ascii_case(id),
        ItemValue::AnyCommon => rarity == Rarity::Common,
        ItemValue::AnyUncommon => rarity == Rarity::Uncommon,
        ItemValue::AnyRare => rarity == Rarity::Rare,
        ItemValue::AnyLegendary => rarity == Rarity::Legendary,
        ItemValue::AnyEdition | ItemValue::AnyEnhancement | ItemValue::AnySeal => false,
    }
}

pub fn matches_named_only(value: &ItemValue, id: &str) -> bool {
    matches!(value, ItemValue::Named(name) if name.eq_ignore_ascii_case(id))
}

pub fn matches_edition(clause_edition: Option<Edition>, outcome_edition: Option<Edition>) -> bool {
    match clause_edition {
        None => true,
        Some(Edition::Base) => outcome_edition.is_none() || outcome_edition == Some(Edition::Base),
        Some(e) => outcome_edition == Some(e),
    }
}

pub fn matches_sticker(clause_sticker: Option<Sticker>, outcome_sticker: Option<Sticker>) -> bool {
    match clause_sticker {
        None => true,
        Some(s) => outcome_sticker == Some(s),
    }
}
