//! The boundary between this engine and the Balatro item-generation model.
//!
//! Everything under this module is a trait: the actual PRNG streams that
//! decide what a shop slot or pack contains belong to a separate,
//! game-accurate implementation that conforms to [`ItemStreamSource`]. This
//! crate only defines the shape of that collaborator and the small value
//! types it hands back.

mod outcomes;

pub use outcomes::{
    CardOutcome, ConsumableKind, JokerOutcome, PackKind, PackOutcome, PackSize, PlayingCardOutcome,
    ShopItemOutcome, TagOutcome, VoucherOutcome,
};

use crate::batch::{Seed, SeedBatch};
use crate::enums::Boss;
use crate::mask::{LaneVec, VectorMask};

/// Per-seed state the generation model threads through a sequence of stream
/// reads; owned by the scoring driver for exactly one seed's lifetime and
/// never read by `seedscan-filter` directly.
pub type LaneRunState<S> = <S as ScalarItemStreamSource>::LaneState;

/// A conforming implementation knows how to advance Balatro's item-generation
/// PRNGs for one seed at a time. It is the only part of the pipeline allowed
/// to know anything about the game's actual RNG algorithm; every other crate
/// treats its outputs as opaque facts about a run.
///
/// This is the single-lane primitive surface a generation-rules crate
/// implements; [`ItemStreamSource`] — the 8-lane vectorized contract the
/// filter tree actually drives — is derived from it automatically (see the
/// blanket `impl` below), the "portable scalar fallback" the mask algebra's
/// SIMD abstraction is allowed to use.
pub trait ScalarItemStreamSource {
    /// Opaque per-seed cursor state (consumed PRNG words, voucher unlocks
    /// applied so far, and so on).
    type LaneState;

    fn open_lane(&self, seed: &Seed) -> Self::LaneState;

    type ShopJokerStream;
    fn open_shop_item_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopJokerStream;
    fn next_shop_item(&self, stream: &mut Self::ShopJokerStream) -> Option<JokerOutcome>;

    type ShopTarotStream;
    fn open_shop_tarot_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopTarotStream;
    fn next_shop_tarot(&self, stream: &mut Self::ShopTarotStream) -> Option<ShopItemOutcome>;

    type ShopSpectralStream;
    fn open_shop_spectral_stream(
        &self,
        lane: &mut Self::LaneState,
        ante: u8,
    ) -> Self::ShopSpectralStream;
    fn next_shop_spectral(&self, stream: &mut Self::ShopSpectralStream) -> Option<ShopItemOutcome>;

    type ShopPlanetStream;
    fn open_shop_planet_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopPlanetStream;
    fn next_shop_planet(&self, stream: &mut Self::ShopPlanetStream) -> Option<ShopItemOutcome>;

    type PackStream;
    fn open_booster_pack_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::PackStream;
    fn next_booster_pack(&self, stream: &mut Self::PackStream) -> Option<PackOutcome>;

    type ArcanaPackStream;
    fn open_arcana_pack_tarot_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::ArcanaPackStream;
    fn next_arcana_pack_contents(&self, stream: &mut Self::ArcanaPackStream) -> Option<CardOutcome>;
    fn next_arcana_pack_has_soul(&self, stream: &mut Self::ArcanaPackStream) -> bool;

    type CelestialPackStream;
    fn open_celestial_pack_planet_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::CelestialPackStream;
    fn next_celestial_pack_contents(
        &self,
        stream: &mut Self::CelestialPackStream,
    ) -> Option<CardOutcome>;

    type SpectralPackStream;
    fn open_spectral_pack_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::SpectralPackStream;
    fn next_spectral_pack_contents(
        &self,
        stream: &mut Self::SpectralPackStream,
    ) -> Option<CardOutcome>;
    fn next_spectral_pack_has_soul(&self, stream: &mut Self::SpectralPackStream) -> bool;

    type StandardPackStream;
    fn open_standard_pack_card_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::StandardPackStream;
    fn next_standard_pack_contents(
        &self,
        stream: &mut Self::StandardPackStream,
    ) -> Option<PlayingCardOutcome>;

    type BuffoonPackStream;
    fn open_buffoon_pack_joker_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::BuffoonPackStream;
    fn next_buffoon_pack_contents(&self, stream: &mut Self::BuffoonPackStream) -> Option<JokerOutcome>;

    type TagStream;
    fn open_tag_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::TagStream;
    fn next_tag(&self, stream: &mut Self::TagStream) -> Option<TagOutcome>;

    type SoulJokerStream;
    fn open_soul_joker_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::SoulJokerStream;
    fn next_soul_joker(&self, stream: &mut Self::SoulJokerStream) -> Option<JokerOutcome>;

    /// The voucher offered at the start of `ante`; vouchers have no slot
    /// index, exactly one is offered per ante.
    fn ante_first_voucher(&self, lane: &mut Self::LaneState, ante: u8) -> VoucherOutcome;

    /// The boss blind for `ante`; exactly one per ante, no slot index.
    fn ante_boss(&self, lane: &mut Self::LaneState, ante: u8) -> Boss;

    /// Apply a purchased voucher's unlock effects (e.g. Hieroglyph reducing
    /// ante length) to `lane`'s cursor state so later-ante reads reflect it.
    fn apply_voucher_effect(&self, lane: &mut Self::LaneState, voucher: &VoucherOutcome);
}

/// The 8-lane vectorized contract the filter tree's `prefilter_batch` stage
/// actually drives: every accessor advances all eight lanes' streams in one
/// call, narrowed by `alive` (lanes outside `alive` are skipped — dead lanes
/// already failed an earlier clause and spending a PRNG call on them is
/// wasted work the two-stage design exists to avoid).
///
/// A stream handle is wrapped in `Option` per lane: `None` means either the
/// lane wasn't `alive` for this call or (for a `next_*` result) the
/// underlying single-lane stream was already exhausted.
pub trait ItemStreamSource {
    type LaneState;

    fn open_lanes(&self, batch: &SeedBatch) -> LaneVec<Self::LaneState>;

    type ShopJokerStream;
    fn open_shop_item_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopJokerStream>>;
    fn next_shop_item_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopJokerStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<JokerOutcome>>;

    type ShopTarotStream;
    fn open_shop_tarot_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopTarotStream>>;
    fn next_shop_tarot_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopTarotStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<ShopItemOutcome>>;

    type ShopSpectralStream;
    fn open_shop_spectral_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopSpectralStream>>;
    fn next_shop_spectral_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopSpectralStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<ShopItemOutcome>>;

    type ShopPlanetStream;
    fn open_shop_planet_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopPlanetStream>>;
    fn next_shop_planet_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopPlanetStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<ShopItemOutcome>>;

    type PackStream;
    fn open_booster_pack_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::PackStream>>;
    fn next_booster_pack_batch(
        &self,
        streams: &mut LaneVec<Option<Self::PackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<PackOutcome>>;

    type ArcanaPackStream;
    fn open_arcana_pack_tarot_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::ArcanaPackStream>>;
    fn next_arcana_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ArcanaPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<CardOutcome>>;
    fn next_arcana_pack_has_soul_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ArcanaPackStream>>,
        alive: VectorMask,
    ) -> VectorMask;

    type CelestialPackStream;
    fn open_celestial_pack_planet_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::CelestialPackStream>>;
    fn next_celestial_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::CelestialPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<CardOutcome>>;

    type SpectralPackStream;
    fn open_spectral_pack_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::SpectralPackStream>>;
    fn next_spectral_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::SpectralPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<CardOutcome>>;
    fn next_spectral_pack_has_soul_batch(
        &self,
        streams: &mut LaneVec<Option<Self::SpectralPackStream>>,
        alive: VectorMask,
    ) -> VectorMask;

    type StandardPackStream;
    fn open_standard_pack_card_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::StandardPackStream>>;
    fn next_standard_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::StandardPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<PlayingCardOutcome>>;

    type BuffoonPackStream;
    fn open_buffoon_pack_joker_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::BuffoonPackStream>>;
    fn next_buffoon_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::BuffoonPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<JokerOutcome>>;

    type TagStream;
    fn open_tag_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::TagStream>>;
    fn next_tag_batch(
        &self,
        streams: &mut LaneVec<Option<Self::TagStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<TagOutcome>>;

    type SoulJokerStream;
    fn open_soul_joker_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::SoulJokerStream>>;
    fn next_soul_joker_batch(
        &self,
        streams: &mut LaneVec<Option<Self::SoulJokerStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<JokerOutcome>>;

    fn ante_first_voucher_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<VoucherOutcome>>;

    fn ante_boss_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Boss>>;

    fn apply_voucher_effect_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        vouchers: &LaneVec<Option<VoucherOutcome>>,
    );
}

/// The portable scalar fallback: any generation-rules crate that only
/// implements [`ScalarItemStreamSource`] gets the vectorized contract for
/// free, one lane at a time. A hand-written SIMD backend can instead
/// implement [`ItemStreamSource`] directly and batch several lanes' PRNG
/// calls together; lane semantics are identical either way.
impl<T: ScalarItemStreamSource> ItemStreamSource for T {
    type LaneState = T::LaneState;

    fn open_lanes(&self, batch: &SeedBatch) -> LaneVec<Self::LaneState> {
        LaneVec::build(|i| self.open_lane(&batch.lane(i)))
    }

    type ShopJokerStream = T::ShopJokerStream;
    fn open_shop_item_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopJokerStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_shop_item_stream(lanes.get_mut(i), ante)))
    }
    fn next_shop_item_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopJokerStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<JokerOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_shop_item(s))).flatten()
        })
    }

    type ShopTarotStream = T::ShopTarotStream;
    fn open_shop_tarot_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopTarotStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_shop_tarot_stream(lanes.get_mut(i), ante)))
    }
    fn next_shop_tarot_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopTarotStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<ShopItemOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_shop_tarot(s))).flatten()
        })
    }

    type ShopSpectralStream = T::ShopSpectralStream;
    fn open_shop_spectral_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopSpectralStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_shop_spectral_stream(lanes.get_mut(i), ante)))
    }
    fn next_shop_spectral_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopSpectralStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<ShopItemOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_shop_spectral(s))).flatten()
        })
    }

    type ShopPlanetStream = T::ShopPlanetStream;
    fn open_shop_planet_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::ShopPlanetStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_shop_planet_stream(lanes.get_mut(i), ante)))
    }
    fn next_shop_planet_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ShopPlanetStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<ShopItemOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_shop_planet(s))).flatten()
        })
    }

    type PackStream = T::PackStream;
    fn open_booster_pack_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::PackStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_booster_pack_stream(lanes.get_mut(i), ante)))
    }
    fn next_booster_pack_batch(
        &self,
        streams: &mut LaneVec<Option<Self::PackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<PackOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_booster_pack(s))).flatten()
        })
    }

    type ArcanaPackStream = T::ArcanaPackStream;
    fn open_arcana_pack_tarot_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::ArcanaPackStream>> {
        LaneVec::build(|i| {
            alive.test(i).then(|| self.open_arcana_pack_tarot_stream(lanes.get_mut(i), pack_index))
        })
    }
    fn next_arcana_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ArcanaPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<CardOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i))
                .then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_arcana_pack_contents(s)))
                .flatten()
        })
    }
    fn next_arcana_pack_has_soul_batch(
        &self,
        streams: &mut LaneVec<Option<Self::ArcanaPackStream>>,
        alive: VectorMask,
    ) -> VectorMask {
        let mut mask = VectorMask::NONE_SET;
        for i in alive.iter_indices() {
            if let Some(s) = streams.get_mut(i) {
                mask.set(i, self.next_arcana_pack_has_soul(s));
            }
        }
        mask
    }

    type CelestialPackStream = T::CelestialPackStream;
    fn open_celestial_pack_planet_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::CelestialPackStream>> {
        LaneVec::build(|i| {
            alive.test(i).then(|| self.open_celestial_pack_planet_stream(lanes.get_mut(i), pack_index))
        })
    }
    fn next_celestial_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::CelestialPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<CardOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i))
                .then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_celestial_pack_contents(s)))
                .flatten()
        })
    }

    type SpectralPackStream = T::SpectralPackStream;
    fn open_spectral_pack_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::SpectralPackStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_spectral_pack_stream(lanes.get_mut(i), pack_index)))
    }
    fn next_spectral_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::SpectralPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<CardOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i))
                .then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_spectral_pack_contents(s)))
                .flatten()
        })
    }
    fn next_spectral_pack_has_soul_batch(
        &self,
        streams: &mut LaneVec<Option<Self::SpectralPackStream>>,
        alive: VectorMask,
    ) -> VectorMask {
        let mut mask = VectorMask::NONE_SET;
        for i in alive.iter_indices() {
            if let Some(s) = streams.get_mut(i) {
                mask.set(i, self.next_spectral_pack_has_soul(s));
            }
        }
        mask
    }

    type StandardPackStream = T::StandardPackStream;
    fn open_standard_pack_card_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::StandardPackStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_standard_pack_card_stream(lanes.get_mut(i), pack_index)))
    }
    fn next_standard_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::StandardPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<PlayingCardOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i))
                .then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_standard_pack_contents(s)))
                .flatten()
        })
    }

    type BuffoonPackStream = T::BuffoonPackStream;
    fn open_buffoon_pack_joker_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        pack_index: u32,
    ) -> LaneVec<Option<Self::BuffoonPackStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_buffoon_pack_joker_stream(lanes.get_mut(i), pack_index)))
    }
    fn next_buffoon_pack_contents_batch(
        &self,
        streams: &mut LaneVec<Option<Self::BuffoonPackStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<JokerOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i))
                .then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_buffoon_pack_contents(s)))
                .flatten()
        })
    }

    type TagStream = T::TagStream;
    fn open_tag_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::TagStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_tag_stream(lanes.get_mut(i), ante)))
    }
    fn next_tag_batch(
        &self,
        streams: &mut LaneVec<Option<Self::TagStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<TagOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_tag(s))).flatten()
        })
    }

    type SoulJokerStream = T::SoulJokerStream;
    fn open_soul_joker_stream_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Self::SoulJokerStream>> {
        LaneVec::build(|i| alive.test(i).then(|| self.open_soul_joker_stream(lanes.get_mut(i), ante)))
    }
    fn next_soul_joker_batch(
        &self,
        streams: &mut LaneVec<Option<Self::SoulJokerStream>>,
        alive: VectorMask,
    ) -> LaneVec<Option<JokerOutcome>> {
        LaneVec::build(|i| {
            (alive.test(i)).then(|| streams.get_mut(i).as_mut().and_then(|s| self.next_soul_joker(s))).flatten()
        })
    }

    fn ante_first_voucher_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<VoucherOutcome>> {
        LaneVec::build(|i| alive.test(i).then(|| self.ante_first_voucher(lanes.get_mut(i), ante)))
    }

    fn ante_boss_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        ante: u8,
    ) -> LaneVec<Option<Boss>> {
        LaneVec::build(|i| alive.test(i).then(|| self.ante_boss(lanes.get_mut(i), ante)))
    }

    fn apply_voucher_effect_batch(
        &self,
        lanes: &mut LaneVec<Self::LaneState>,
        alive: VectorMask,
        vouchers: &LaneVec<Option<VoucherOutcome>>,
    ) {
        for i in alive.iter_indices() {
            if let Some(voucher) = vouchers.get(i) {
                self.apply_voucher_effect(lanes.get_mut(i), voucher);
            }
        }
    }
}

/// Convenience surface for the per-lane verify step: re-running a single
/// seed through the same generation model a vectorized pre-filter used, to
/// confirm a candidate lane that the 8-wide pass could only approximate
/// (Soul joker identity, playing-card enhancement/seal/edition combinations).
pub trait SingleLaneItemStreamSource: ScalarItemStreamSource {
    fn verify_lane(&self, seed: &Seed) -> Self::LaneState {
        self.open_lane(seed)
    }
}

impl<T: ScalarItemStreamSource> SingleLaneItemStreamSource for T {}
