//! Boss clause: the boss blind for a specific ante.

use seedscan_core::clause::{Clause, ItemValue};
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};
use seedscan_core::Boss;

use crate::node::ClauseEvaluator;

pub struct BossEvaluator {
    pub clause: Clause,
}

impl BossEvaluator {
    fn full_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let wanted: Option<Boss> = match &self.clause.value {
            ItemValue::Named(name) => name.parse().ok(),
            _ => None,
        };
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let boss = source.ante_boss(lane, ante);
            if wanted == Some(boss) {
                total += 1;
            }
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for BossEvaluator
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
