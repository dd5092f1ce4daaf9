//! The clause model: a single normalized predicate plus the combinators
//! (`And`/`Or`/`Not`) that compose them into a query's filter tree.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::enums::{Edition, Enhancement, ItemCategory, Rank, Seal, Sticker, Suit, TagSlot};
use crate::error::CoreError;

/// Highest ante this engine tracks (antes beyond this are unreachable in a
/// standard run and are rejected at clause-construction time).
pub const MAX_ANTE: u8 = 39;

/// Upper bound on a shop/pack slot index a clause can reference.
pub const MAX_SLOTS: usize = 16;

/// A bitset over antes `0..=MAX_ANTE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnteSet(u64);

impl AnteSet {
    /// Antes 1 through 8: the default scope when a clause doesn't specify one.
    pub const ALL_DEFAULT: AnteSet = AnteSet::from_range(1, 8);

    pub const fn empty() -> Self {
        AnteSet(0)
    }

    pub const fn from_range(lo: u8, hi: u8) -> Self {
        let mut bits: u64 = 0;
        let mut a = lo;
        while a <= hi {
            bits |= 1u64 << a;
            a += 1;
        }
        AnteSet(bits)
    }

    pub fn from_antes(antes: impl IntoIterator<Item = u8>) -> Result<Self, CoreError> {
        let mut bits: u64 = 0;
        for a in antes {
            if a > MAX_ANTE {
                return Err(CoreError::AnteOutOfRange(a));
            }
            bits |= 1u64 << a;
        }
        if bits == 0 {
            return Err(CoreError::InvalidAntes);
        }
        Ok(AnteSet(bits))
    }

    #[inline]
    pub const fn contains(self, ante: u8) -> bool {
        ante <= MAX_ANTE && (self.0 & (1u64 << ante)) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: AnteSet) -> AnteSet {
        AnteSet(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        let bits = self.0;
        (0..=MAX_ANTE).filter(move |a| (bits & (1u64 << a)) != 0)
    }

    pub fn max(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros() as u8)
        }
    }
}

/// A bitset over shop/pack slot indices `0..MAX_SLOTS`, used by clauses that
/// constrain which slot(s) an item may appear in (empty ⇒ "any slot").
///
/// A clause carries two independent masks — `shop_slots` and `pack_slots` —
/// rather than one shared mask, since a clause may restrict only the shop
/// (e.g. soul jokers, which never have shop slots) or only packs, or both
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotMask(u64);

impl SlotMask {
    pub const fn any() -> Self {
        SlotMask(0)
    }

    pub fn from_slots(slots: impl IntoIterator<Item = u8>) -> Result<Self, CoreError> {
        let mut bits: u64 = 0;
        for s in slots {
            if s as usize >= MAX_SLOTS {
                return Err(CoreError::SlotOutOfRange(s));
            }
            bits |= 1u64 << s;
        }
        Ok(SlotMask(bits))
    }

    #[inline]
    pub const fn matches(self, slot: u8) -> bool {
        self.0 == 0 || ((slot as usize) < MAX_SLOTS && (self.0 & (1u64 << slot)) != 0)
    }

    #[inline]
    pub const fn is_any(self) -> bool {
        self.0 == 0
    }
}

/// The `value` field of a clause: either a concrete identifier known to the
/// item-generation model, or one of the spec's wildcard keywords.
///
/// Identifier validity (does "Blueprint" name a real joker?) is the
/// generation model's business, not this crate's; this type only recognizes
/// the wildcard vocabulary and otherwise treats `value` as an opaque token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemValue {
    Named(String),
    AnyCommon,
    AnyUncommon,
    AnyRare,
    AnyLegendary,
    AnyEdition,
    AnyEnhancement,
    AnySeal,
}

impl ItemValue {
    pub fn parse(raw: &str, category: ItemCategory) -> Result<Self, CoreError> {
        let v = match raw.to_ascii_lowercase().as_str() {
            "any_common" => ItemValue::AnyCommon,
            "any_uncommon" => ItemValue::AnyUncommon,
            "any_rare" => ItemValue::AnyRare,
            "any_legendary" => ItemValue::AnyLegendary,
            "any_edition" => ItemValue::AnyEdition,
            "any_enhancement" => ItemValue::AnyEnhancement,
            "any_seal" => ItemValue::AnySeal,
            _ => ItemValue::Named(raw.to_string()),
        };
        if matches!(v, ItemValue::AnyLegendary) && category == ItemCategory::SoulJoker {
            return Err(CoreError::AnyLegendaryOnSoulJoker);
        }
        Ok(v)
    }

    pub fn is_wildcard(&self) -> bool {
        !matches!(self, ItemValue::Named(_))
    }
}

/// How a group of nested clauses combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClauseMode {
    And,
    Or,
    /// Negates its single nested clause; `nested` must have exactly one entry.
    Not,
}

/// A single normalized predicate, or a composite of nested clauses.
///
/// `nested` is non-empty only for `And`/`Or`/`Not` composite clauses, in
/// which case every other field except `antes` is ignored; a `Not` composite
/// uses exactly one entry in `nested`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    pub category: ItemCategory,
    pub value: ItemValue,
    /// Free-text tag for a query author's own bookkeeping; never read by
    /// the filter tree or the scoring driver.
    pub label: Option<String>,
    pub antes: AnteSet,
    /// Shop slot restriction (empty ⇒ any shop slot).
    pub shop_slots: SlotMask,
    /// Booster-pack slot restriction (empty ⇒ any pack slot).
    pub pack_slots: SlotMask,
    pub edition: Option<Edition>,
    pub sticker: Option<Sticker>,
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
    pub seal: Option<Seal>,
    pub enhancement: Option<Enhancement>,
    pub tag_slot: Option<TagSlot>,
    /// Only a Mega-sized pack (5 cards) may satisfy this clause's pack-side
    /// checks; meaningless for shop-side matches.
    pub require_mega: bool,
    pub min_count: u32,
    /// Weight applied to this clause's occurrence count when it appears in
    /// a query's `should` list. Meaningless (and ignored) elsewhere.
    pub score: u32,
    pub mode: Option<ClauseMode>,
    pub nested: Vec<Clause>,
    /// Present only on an `and`/`or` group built from the JSON
    /// `{antes:[...], clauses:[...]}` shape: the group is expanded, once at
    /// construction time, into one `And` branch per ante in this set, each
    /// holding a deep clone of `nested` restricted to that single ante,
    /// wrapped in `Or`. `None` means the group uses its children's own
    /// antes unchanged (the plain `[clause, ...]` shape).
    pub group_antes: Option<AnteSet>,
}

impl Clause {
    /// A bare leaf clause matching `category`/`value` across the default antes.
    pub fn leaf(category: ItemCategory, value: ItemValue) -> Self {
        Clause {
            category,
            value,
            label: None,
            antes: AnteSet::ALL_DEFAULT,
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
            mode: None,
            nested: Vec::new(),
            group_antes: None,
        }
    }

    pub fn is_composite(&self) -> bool {
        !self.nested.is_empty()
    }

    /// The antes a composite or leaf clause actually reaches, after folding
    /// any per-group override down onto its children.
    pub fn effective_antes(&self) -> AnteSet {
        if self.nested.is_empty() {
            self.antes
        } else if let Some(group_antes) = self.group_antes {
            group_antes
        } else {
            self.nested
                .iter()
                .fold(AnteSet::empty(), |acc, c| acc.union(c.effective_antes()))
        }
    }

    /// A deep clone of this clause (and, recursively, its nested children)
    /// restricted to a single ante: every leaf's `antes` becomes `{ante}`
    /// alone. Used by the And/Or-group per-ante expansion (`build_and_group`
    /// in `seedscan-filter`) — never by plain leaf clauses directly.
    pub fn restricted_to_ante(&self, ante: u8) -> Clause {
        let mut c = self.clone();
        c.antes = AnteSet::from_antes([ante]).expect("ante is already validated in range");
        c.group_antes = None;
        c.nested = self.nested.iter().map(|child| child.restricted_to_ante(ante)).collect();
        c
    }
}
