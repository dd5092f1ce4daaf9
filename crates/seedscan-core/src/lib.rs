//! Core types for the seed search engine: the clause/query model, the
//! 8-lane vectorized mask algebra, and the trait boundary to the Balatro
//! item-generation model.
//!
//! Pure data and pure algebra only; no file I/O, no logging, no PRNG
//! algorithm. Everything here is usable from `#![no_std]` callers with the
//! `std` feature disabled.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod batch;
pub mod clause;
pub mod enums;
pub mod error;
pub mod mask;
pub mod query;
pub mod streams;

pub use batch::{Seed, SeedBatch, SEED_SPACE_SIZE};
pub use clause::{AnteSet, Clause, ClauseMode, ItemValue, SlotMask, MAX_ANTE, MAX_SLOTS};
pub use enums::{
    Boss, Deck, Edition, Enhancement, ItemCategory, Rank, Rarity, Seal, Stake, Sticker, Suit, TagSlot,
};
pub use error::CoreError;
pub use mask::{LaneVec, VectorMask, LANES};
pub use query::{Query, QueryMeta};
pub use streams::{
    CardOutcome, ConsumableKind, ItemStreamSource, JokerOutcome, LaneRunState, PackKind, PackOutcome,
    PackSize, PlayingCardOutcome, ScalarItemStreamSource, ShopItemOutcome, SingleLaneItemStreamSource,
    TagOutcome, VoucherOutcome,
};
