//! Tag clause: the skip tag(s) offered at the start of an ante.
//!
//! `tag_slot` narrows which of the (up to two) tags offered per ante a
//! match must come from; `Either` (the default when unset) accepts both.

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};
use seedscan_core::TagSlot;

use super::common::matches_named_only;
use crate::node::ClauseEvaluator;

pub struct TagEvaluator {
    pub clause: Clause,
}

impl TagEvaluator {
    fn full_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let wanted_slot = self.clause.tag_slot.unwrap_or(TagSlot::Either);
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let mut stream = source.open_tag_stream(lane, ante);
            let mut idx = 0u8;
            while let Some(tag) = source.next_tag(&mut stream) {
                let in_slot = match wanted_slot {
                    TagSlot::Either => true,
                    TagSlot::Small => idx == 0,
                    TagSlot::Big => idx == 1,
                };
                if in_slot && matches_named_only(&self.clause.value, &tag.id) {
                    total += 1;
                }
                idx += 1;
            }
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for TagEvaluator
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
