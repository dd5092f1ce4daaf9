//! The top-level query: `must`/`must_not`/`should` clause lists plus the
//! deck/stake context they're evaluated under.

use alloc::string::String;
use alloc::vec::Vec;

use crate::clause::Clause;
use crate::enums::{Deck, ItemCategory, Stake};

/// Free-text metadata carried alongside a query; never affects filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryMeta {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub date_created: Option<String>,
}

/// A fully parsed, not-yet-validated search query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub must: Vec<Clause>,
    pub must_not: Vec<Clause>,
    pub should: Vec<Clause>,
    pub deck: Deck,
    pub stake: Stake,
    pub meta: QueryMeta,
}

impl Query {
    pub fn new(deck: Deck, stake: Stake) -> Self {
        Query {
            must: Vec::new(),
            must_not: Vec::new(),
            should: Vec::new(),
            deck,
            stake,
            meta: QueryMeta::default(),
        }
    }

    /// All clauses across `must`/`must_not`/`should`, in evaluation order.
    pub fn all_clauses(&self) -> impl Iterator<Item = &Clause> {
        self.must.iter().chain(self.must_not.iter()).chain(self.should.iter())
    }

    /// Highest ante any voucher clause reaches; drives how many antes of
    /// voucher-activation side effects the scoring driver must replay before
    /// later-ante clauses can be evaluated correctly.
    pub fn max_voucher_ante(&self) -> Option<u8> {
        self.all_clauses()
            .filter(|c| c.category == ItemCategory::Voucher)
            .filter_map(|c| c.effective_antes().max())
            .max()
    }

    /// Highest ante referenced by any clause at all (used to size how far a
    /// seed needs to be advanced before it can be fully scored).
    pub fn max_ante(&self) -> Option<u8> {
        self.all_clauses().filter_map(|c| c.effective_antes().max()).max()
    }
}
