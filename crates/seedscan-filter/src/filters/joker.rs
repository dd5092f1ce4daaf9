//! Joker clause: shop joker slots plus jokers found inside Buffoon packs.

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, PackKind, ScalarItemStreamSource};

use super::common::{matches_edition, matches_named_or_rarity, matches_sticker};
use crate::node::ClauseEvaluator;

pub struct JokerEvaluator {
    pub clause: Clause,
}

impl JokerEvaluator {
    /// Occurrences across every ante the clause covers; used both to decide
    /// pass/fail (against `min_count`) and, for `should` clauses, as the
    /// scoring driver's per-clause tally. Never early-exits, since a score
    /// needs the true count rather than a threshold check.
    fn full_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let mut shop = source.open_shop_item_stream(lane, ante);
            let mut slot = 0u8;
            while let Some(j) = source.next_shop_item(&mut shop) {
                if self.clause.shop_slots.matches(slot)
                    && matches_named_or_rarity(&self.clause.value, &j.id, j.rarity)
                    && matches_edition(self.clause.edition, j.edition)
                    && matches_sticker(self.clause.sticker, j.sticker)
                {
                    total += 1;
                }
                slot += 1;
            }

            let mut packs = source.open_booster_pack_stream(lane, ante);
            while let Some(pack) = source.next_booster_pack(&mut packs) {
                if pack.kind != PackKind::Buffoon {
                    continue;
                }
                if !self.clause.pack_slots.matches(pack.pack_index as u8) {
                    continue;
                }
                if self.clause.require_mega && !pack.size.is_mega() {
                    continue;
                }
                let mut contents = source.open_buffoon_pack_joker_stream(lane, pack.pack_index);
                while let Some(j) = source.next_buffoon_pack_contents(&mut contents) {
                    if matches_named_or_rarity(&self.clause.value, &j.id, j.rarity)
                        && matches_edition(self.clause.edition, j.edition)
                        && matches_sticker(self.clause.sticker, j.sticker)
                    {
                        total += 1;
                    }
                }
            }
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for JokerEvaluator
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    fn prefilter_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        self.full_count(source, lane) >= self.clause.min_count
    }

    fn count_lane(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        self.full_count(source, lane)
    }
}
