//! On-disk JSON shape of a query file, and its conversion into
//! [`seedscan_core`] types.
//!
//! Slot/mega restrictions can be written either inside a nested `sources`
//! object or as flat aliases (`shopSlots`, `packSlots`, `tags`, `requireMega`)
//! directly on the clause; a flat alias wins over its `sources.*`
//! counterpart only when both are present.

use std::str::FromStr;

use seedscan_core::clause::{AnteSet, Clause, ClauseMode, ItemValue, SlotMask};
use seedscan_core::enums::{
    Boss, Deck, Edition, Enhancement, ItemCategory, Rank, Seal, Stake, Sticker, Suit, TagSlot,
};
use seedscan_core::query::{Query, QueryMeta};
use serde::{Deserialize, Serialize};

use crate::QueryIoError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSources {
    #[serde(default, rename = "shopSlots")]
    pub shop_slots: Option<Vec<u8>>,
    #[serde(default, rename = "packSlots")]
    pub pack_slots: Option<Vec<u8>>,
    #[serde(default, rename = "tags")]
    pub tag_slot: Option<String>,
    #[serde(default, rename = "requireMega")]
    pub require_mega: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawClause {
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub antes: Option<Vec<u8>>,
    #[serde(default)]
    pub sources: Option<RawSources>,
    #[serde(default, rename = "shopSlots")]
    pub shop_slots: Option<Vec<u8>>,
    #[serde(default, rename = "packSlots")]
    pub pack_slots: Option<Vec<u8>>,
    #[serde(default, rename = "tags")]
    pub tag_slot: Option<String>,
    #[serde(default, rename = "requireMega")]
    pub require_mega: Option<bool>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default, rename = "stickers")]
    pub sticker: Option<String>,
    #[serde(default)]
    pub suit: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub seal: Option<String>,
    #[serde(default)]
    pub enhancement: Option<String>,
    #[serde(default = "default_min_count", rename = "min")]
    pub min_count: u32,
    #[serde(default = "default_score")]
    pub score: u32,
    #[serde(default)]
    pub and: Option<RawGroup>,
    #[serde(default)]
    pub or: Option<RawGroup>,
    #[serde(default)]
    pub not: Option<Box<RawClause>>,
}

/// An `and`/`or` group's children, either a bare array (children keep their
/// own antes) or `{antes, clauses}` (children are cloned once per ante in
/// `antes`, per-ante, and OR'd — see [`Clause::restricted_to_ante`]).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawGroup {
    Clauses(Vec<RawClause>),
    WithAntes {
        #[serde(default)]
        antes: Option<Vec<u8>>,
        clauses: Vec<RawClause>,
    },
}

impl RawGroup {
    fn into_parts(self) -> (Option<Vec<u8>>, Vec<RawClause>) {
        match self {
            RawGroup::Clauses(clauses) => (None, clauses),
            RawGroup::WithAntes { antes, clauses } => (antes, clauses),
        }
    }
}

fn default_min_count() -> u32 {
    1
}

fn default_score() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawQueryMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "dateCreated")]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawQuery {
    #[serde(default)]
    pub must: Vec<RawClause>,
    #[serde(default, rename = "mustNot")]
    pub must_not: Vec<RawClause>,
    #[serde(default)]
    pub should: Vec<RawClause>,
    #[serde(default = "default_deck")]
    pub deck: String,
    #[serde(default = "default_stake")]
    pub stake: String,
    #[serde(flatten)]
    pub meta: RawQueryMeta,
}

fn default_deck() -> String {
    "red".to_string()
}

fn default_stake() -> String {
    "white".to_string()
}

fn parse_opt<T: FromStr<Err = seedscan_core::CoreError>>(
    field: &'static str,
    raw: &Option<String>,
) -> Result<Option<T>, QueryIoError> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse::<T>()
            .map(Some)
            .map_err(|e| QueryIoError::Clause { field, source: e }),
    }
}

impl RawClause {
    /// A flat alias wins over its `sources.*` counterpart; `sources.*` is
    /// only consulted when the flat field is absent.
    fn merged_shop_slots(&self) -> Option<Vec<u8>> {
        self.shop_slots.clone().or_else(|| self.sources.as_ref().and_then(|s| s.shop_slots.clone()))
    }

    fn merged_pack_slots(&self) -> Option<Vec<u8>> {
        self.pack_slots.clone().or_else(|| self.sources.as_ref().and_then(|s| s.pack_slots.clone()))
    }

    fn merged_tag_slot(&self) -> Option<String> {
        self.tag_slot.clone().or_else(|| self.sources.as_ref().and_then(|s| s.tag_slot.clone()))
    }

    fn merged_require_mega(&self) -> bool {
        self.require_mega
            .or_else(|| self.sources.as_ref().and_then(|s| s.require_mega))
            .unwrap_or(false)
    }

    pub fn into_clause(self) -> Result<Clause, QueryIoError> {
        if self.and.is_some() || self.or.is_some() || self.not.is_some() {
            return self.into_composite_clause();
        }
        let category_raw = self
            .category
            .clone()
            .ok_or(QueryIoError::MissingField("type"))?;
        let category: ItemCategory = category_raw
            .parse()
            .map_err(|e| QueryIoError::Clause { field: "type", source: e })?;
        let value_raw = self.value.clone().ok_or(QueryIoError::MissingField("value"))?;
        if category == ItemCategory::Boss {
            value_raw
                .parse::<Boss>()
                .map_err(|e| QueryIoError::Clause { field: "value", source: e })?;
        }
        let value = ItemValue::parse(&value_raw, category)
            .map_err(|e| QueryIoError::Clause { field: "value", source: e })?;

        let antes = match &self.antes {
            Some(list) => AnteSet::from_antes(list.iter().copied())
                .map_err(|e| QueryIoError::Clause { field: "antes", source: e })?,
            None => AnteSet::ALL_DEFAULT,
        };
        let shop_slots = match self.merged_shop_slots() {
            Some(list) => SlotMask::from_slots(list)
                .map_err(|e| QueryIoError::Clause { field: "shopSlots", source: e })?,
            None => SlotMask::any(),
        };
        let pack_slots = match self.merged_pack_slots() {
            Some(list) => SlotMask::from_slots(list)
                .map_err(|e| QueryIoError::Clause { field: "packSlots", source: e })?,
            None => SlotMask::any(),
        };
        let tag_slot = match self.merged_tag_slot() {
            Some(s) => Some(s.parse::<TagSlot>().map_err(|e| QueryIoError::Clause { field: "tags", source: e })?),
            None => None,
        };

        Ok(Clause {
            category,
            value,
            label: self.label.clone(),
            antes,
            shop_slots,
            pack_slots,
            edition: parse_opt::<Edition>("edition", &self.edition)?,
            sticker: parse_opt::<Sticker>("stickers", &self.sticker)?,
            suit: parse_opt::<Suit>("suit", &self.suit)?,
            rank: parse_opt::<Rank>("rank", &self.rank)?,
            seal: parse_opt::<Seal>("seal", &self.seal)?,
            enhancement: parse_opt::<Enhancement>("enhancement", &self.enhancement)?,
            tag_slot,
            require_mega: self.merged_require_mega(),
            min_count: self.min_count,
            score: self.score,
            mode: None,
            nested: Vec::new(),
            group_antes: None,
        })
    }

    fn into_composite_clause(self) -> Result<Clause, QueryIoError> {
        let label = self.label.clone();
        let (mode, group) = match (self.and, self.or, self.not) {
            (Some(group), None, None) => (ClauseMode::And, group),
            (None, Some(group), None) => (ClauseMode::Or, group),
            (None, None, Some(child)) => (ClauseMode::Not, RawGroup::Clauses(vec![*child])),
            _ => return Err(QueryIoError::AmbiguousComposite),
        };
        let (group_antes_raw, children) = group.into_parts();
        if children.is_empty() {
            return Err(QueryIoError::EmptyComposite);
        }
        let nested = children
            .into_iter()
            .map(RawClause::into_clause)
            .collect::<Result<Vec<_>, _>>()?;
        let group_antes = match group_antes_raw {
            Some(list) => Some(
                AnteSet::from_antes(list).map_err(|e| QueryIoError::Clause { field: "antes", source: e })?,
            ),
            None => None,
        };
        let antes = group_antes
            .unwrap_or_else(|| nested.iter().fold(AnteSet::empty(), |acc, c| acc.union(c.effective_antes())));
        Ok(Clause {
            category: nested[0].category,
            value: ItemValue::AnyCommon,
            label,
            antes,
            shop_slots: SlotMask::any(),
            pack_slots: SlotMask::any(),
            edition: None,
            sticker: None,
            suit: None,
            rank: None,
            seal: None,
            enhancement: None,
            tag_slot: None,
            require_mega: false,
            min_count: 1,
            score: 1,
            mode: Some(mode),
            nested,
            group_antes,
        })
    }
}

impl RawQuery {
    pub fn into_query(self) -> Result<Query, QueryIoError> {
        let deck: Deck = self
            .deck
            .parse()
            .map_err(|e| QueryIoError::Clause { field: "deck", source: e })?;
        let stake: Stake = self
            .stake
            .parse()
            .map_err(|e| QueryIoError::Clause { field: "stake", source: e })?;
        let must = self
            .must
            .into_iter()
            .map(RawClause::into_clause)
            .collect::<Result<Vec<_>, _>>()?;
        let must_not = self
            .must_not
            .into_iter()
            .map(RawClause::into_clause)
            .collect::<Result<Vec<_>, _>>()?;
        let should = self
            .should
            .into_iter()
            .map(RawClause::into_clause)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Query {
            must,
            must_not,
            should,
            deck,
            stake,
            meta: QueryMeta {
                name: self.meta.name,
                author: self.meta.author,
                description: self.meta.description,
                date_created: self.meta.date_created,
            },
        })
    }
}
