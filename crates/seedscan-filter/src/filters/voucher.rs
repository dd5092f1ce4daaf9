//! Voucher clause: the one voucher offered at the start of each ante.
//!
//! Purchasing a voucher unlocks a permanent effect (Hieroglyph shortens
//! antes, Telescope affects celestial odds, and so on); the scoring driver
//! is responsible for calling [`ItemStreamSource::apply_voucher_effect`]
//! once a voucher clause at an earlier ante has matched, before later-ante
//! clauses are evaluated. This evaluator only checks identity.

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};

use super::common::matches_named_only;
use crate::node::ClauseEvaluator;

pub struct VoucherEvaluator {
    pub clause: Clause,
}

impl VoucherEvaluator {
    fn full_count<S: ScalarItemStreamSource>(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        let mut total = 0u32;
        for ante in self.clause.antes.iter() {
            let voucher = source.ante_first_voucher(lane, ante);
            if matches_named_only(&self.clause.value, &voucher.id) {
                total += 1;
            }
            // Every offered voucher is assumed purchased, so later antes see
            // its unlock effect regardless of whether it matched this clause.
            source.apply_voucher_effect(lane, &voucher);
        }
        total
    }
}

impl<S> ClauseEvaluator<S> for VoucherEvaluator
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
