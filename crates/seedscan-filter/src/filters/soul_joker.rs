//! Soul joker clause: the single legendary joker a Soul card resolves to.
//!
//! A Soul card only appears inside an Arcana or Spectral pack, and only the
//! one per pack [`ScalarItemStreamSource::next_arcana_pack_has_soul`]/
//! [`ScalarItemStreamSource::next_spectral_pack_has_soul`] confirms. The
//! vectorized pass only checks whether the soul joker stream has *any*
//! match at all in the requested antes, ignoring which pack produced it;
//! confirming the match actually came from a pack within `pack_slots` is
//! deferred to the per-lane verify step, which walks the ante's packs in
//! lockstep with the soul joker stream.

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, PackKind, ScalarItemStreamSource};

use super::common::{matches_edition, matches_named_or_rarity, matches_sticker};
use crate::node::ClauseEvaluator;

pub struct SoulJokerEvaluator {
    pub clause: Clause,
}

impl SoulJokerEvaluator {
    fn matches(&self, j: &seedscan_core::streams::JokerOutcome) -> bool {
        matches_named_or_rarity(&self.clause.value, &j.id, j.rarity)
            && matches_edition(self.clause.edition, j.edition)
            && matches_sticker(self.clause.sticker, j.sticker)
    }

    /// Cheap, pack-blind approximation: every soul joker offered in the
    /// clause's antes that matches name/rarity/edition/sticker, without
    /// confirming the pack it came from was within `pack_slots`.
    /// Conservative: can only overcount relative to [`Self::exact_count`].
    fn approx_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let mut stream = source.open_soul_joker_stream(lane, ante);
            while let Some(j) = source.next_soul_joker(&mut stream) {
                if self.matches(&j) {
                    total += 1;
                }
            }
        }
        total
    }

    /// Exact count: walks each ante's booster packs in order, and for every
    /// Arcana or Spectral pack that actually contains the Soul card, pulls
    /// the joker it resolves to off the soul joker stream and only counts
    /// it if the pack's shop index is within `pack_slots`.
    fn exact_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let mut soul_stream = source.open_soul_joker_stream(lane, ante);
            let mut packs = source.open_booster_pack_stream(lane, ante);
            while let Some(pack) = source.next_booster_pack(&mut packs) {
                let has_soul = match pack.kind {
                    PackKind::Arcana => {
                        let mut contents = source.open_arcana_pack_tarot_stream(lane, pack.pack_index);
                        source.next_arcana_pack_has_soul(&mut contents)
                    }
                    PackKind::Spectral => {
                        let mut contents = source.open_spectral_pack_stream(lane, pack.pack_index);
                        source.next_spectral_pack_has_soul(&mut contents)
                    }
                    _ => false,
                };
                if !has_soul {
                    continue;
                }
                let Some(j) = source.next_soul_joker(&mut soul_stream) else {
                    continue;
                };
                if self.clause.pack_slots.matches(pack.pack_index as u8) && self.matches(&j) {
                    total += 1;
                }
            }
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for SoulJokerEvaluator
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    fn prefilter_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        self.approx_count(source, lane) >= self.clause.min_count
    }

    fn verify_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        self.exact_count(source, lane) >= self.clause.min_count
    }

    fn count_lane(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        self.exact_count(source, lane)
    }
}
