//! Tarot clause: shop tarot slots plus tarot cards inside Arcana packs.

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, PackKind, ScalarItemStreamSource};

use super::common::{matches_edition, matches_named_only};
use crate::node::ClauseEvaluator;

pub struct TarotEvaluator {
    pub clause: Clause,
}

impl TarotEvaluator {
    fn full_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let mut shop = source.open_shop_tarot_stream(lane, ante);
            let mut slot = 0u8;
            while let Some(item) = source.next_shop_tarot(&mut shop) {
                if self.clause.shop_slots.matches(slot)
                    && matches_named_only(&self.clause.value, &item.id)
                    && matches_edition(self.clause.edition, item.edition)
                {
                    total += 1;
                }
                slot += 1;
            }

            let mut packs = source.open_booster_pack_stream(lane, ante);
            while let Some(pack) = source.next_booster_pack(&mut packs) {
                if pack.kind != PackKind::Arcana {
                    continue;
                }
                if !self.clause.pack_slots.matches(pack.pack_index as u8) {
                    continue;
                }
                if self.clause.require_mega && !pack.size.is_mega() {
                    continue;
                }
                let mut contents = source.open_arcana_pack_tarot_stream(lane, pack.pack_index);
                while let Some(card) = source.next_arcana_pack_contents(&mut contents) {
                    if matches_named_only(&self.clause.value, &card.id) {
                        total += 1;
                    }
                }
            }
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for TarotEvaluator
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
