//! Playing card clause: cards inside Standard packs.
//!
//! The vectorized pass only compares suit/rank, the two fields every lane
//! needs to check regardless of what else the clause constrains. Deferring
//! enhancement/seal/edition comparison to the verify step means the hot loop
//! skips three extra `Option` comparisons for every card in every lane.

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, PackKind, ScalarItemStreamSource};

use super::common::matches_edition;
use crate::node::ClauseEvaluator;

pub struct PlayingCardEvaluator {
    pub clause: Clause,
}

impl PlayingCardEvaluator {
    fn count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState, exact: bool) -> u32 {
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let mut packs = source.open_booster_pack_stream(lane, ante);
            while let Some(pack) = source.next_booster_pack(&mut packs) {
                if pack.kind != PackKind::Standard {
                    continue;
                }
                if !self.clause.pack_slots.matches(pack.pack_index as u8) {
                    continue;
                }
                if self.clause.require_mega && !pack.size.is_mega() {
                    continue;
                }
                let mut contents = source.open_standard_pack_card_stream(lane, pack.pack_index);
                while let Some(card) = source.next_standard_pack_contents(&mut contents) {
                    if let Some(suit) = self.clause.suit {
                        if card.suit != suit {
                            continue;
                        }
                    }
                    if let Some(rank) = self.clause.rank {
                        if card.rank != rank {
                            continue;
                        }
                    }
                    if exact {
                        if let Some(enh) = self.clause.enhancement {
                            if card.enhancement != Some(enh) {
                                continue;
                            }
                        }
                        if let Some(seal) = self.clause.seal {
                            if card.seal != Some(seal) {
                                continue;
                            }
                        }
                        if !matches_edition(self.clause.edition, card.edition) {
                            continue;
                        }
                    }
                    total += 1;
                }
            }
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for PlayingCardEvaluator
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    fn prefilter_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        self.count(source, lane, false) >= self.clause.min_count
    }

    fn verify_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        self.count(source, lane, true) >= self.clause.min_count
    }

    fn count_lane(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        self.count(source, lane, true)
    }
}
