//! The compiled filter tree: a `ClauseEvaluator` per leaf clause, composed
//! with `And`/`Or`/`Not` the way the source query's `must`/`must_not`/
//! `should` lists and nested composite clauses describe.
//!
//! Evaluation is two-stage, per spec's `PreFilter(batch) -> Mask` /
//! `Verify(lane) -> bool` interface pair: [`FilterTree::prefilter_batch`]
//! narrows a whole [`LaneVec`]/[`VectorMask`] in one call, genuinely
//! vector-wide; [`FilterTree::verify_lane`]/[`FilterTree::score_lane`] then
//! re-check and score only the lanes that survived, one seed at a time. An
//! evaluator's scalar `prefilter_lane` also backs the default
//! `prefilter_batch` (the same portable-scalar-fallback shape
//! `ScalarItemStreamSource` uses), so a category can start scalar and grow a
//! genuinely batched override later without disturbing the tree shape.

use seedscan_core::mask::{LaneVec, VectorMask};
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};

/// One compiled leaf clause: knows how to check a single lane against the
/// generation model, and (via the batch trait bound) a whole lane vector at
/// once for the pre-filter stage.
pub trait ClauseEvaluator<S>: Send + Sync
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    /// Cheap check run for a single lane. May be conservative (return `true`
    /// for a lane that will later fail [`Self::verify_lane`]) but must never
    /// reject a lane that would actually pass.
    fn prefilter_lane(&self, source: &S, lane: &mut S::LaneState) -> bool;

    /// Cheap check run across every lane still `alive`, returning the
    /// narrowed mask. The default loops `prefilter_lane` over `alive`'s
    /// lanes — correct for every category, and the only option for ones
    /// that only know how to do scalar PRNG reads. Categories whose
    /// generation model genuinely benefits from reading all lanes' streams
    /// together (opening a shared per-ante stream once, say) can override
    /// this directly against `S`'s `batch_`-prefixed methods.
    fn prefilter_batch(&self, source: &S, lanes: &mut LaneVec<S::LaneState>, alive: VectorMask) -> VectorMask {
        let mut out = VectorMask::NONE_SET;
        for i in alive.iter_indices() {
            out.set(i, self.prefilter_lane(source, lanes.get_mut(i)));
        }
        out
    }

    /// Exact re-check, run only on lanes [`Self::prefilter_batch`] let
    /// through. The default trusts the prefilter result; only categories
    /// whose prefilter is genuinely approximate (Soul jokers, playing
    /// cards) need to override this.
    fn verify_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        self.prefilter_lane(source, lane)
    }

    /// Occurrence count across the clause's antes, for `should`-clause
    /// scoring. Never early-exits; the default treats a pass/fail evaluator
    /// as a 0/1 count, which is correct for categories that can match at
    /// most once per ante (voucher, boss) but undercounts for categories an
    /// evaluator overrides this for (joker, tarot, planet, ...).
    fn count_lane(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        u32::from(self.verify_lane(source, lane))
    }
}

/// A node in the compiled filter tree.
pub enum FilterNode<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    Leaf(Box<dyn ClauseEvaluator<S>>),
    And(Vec<FilterNode<S>>),
    Or(Vec<FilterNode<S>>),
    Not(Box<FilterNode<S>>),
}

impl<S> FilterNode<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    pub fn prefilter_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        match self {
            FilterNode::Leaf(e) => e.prefilter_lane(source, lane),
            // An empty `and`/`or` group fails every lane rather than
            // vacuously passing — `all()`/`any()` over an empty iterator
            // would otherwise let a malformed empty `and` through.
            FilterNode::And(children) => !children.is_empty() && children.iter().all(|c| c.prefilter_lane(source, lane)),
            FilterNode::Or(children) => children.iter().any(|c| c.prefilter_lane(source, lane)),
            FilterNode::Not(child) => !child.prefilter_lane(source, lane),
        }
    }

    /// Batch pre-filter: narrows `alive` by this node's combinator shape.
    /// `And`/`Or` must evaluate every child against the same starting
    /// `alive` mask (a child doesn't get to see lanes an earlier sibling
    /// already dropped) and then fold the per-child masks together —
    /// looping lane-by-lane here instead would make a sibling's prefilter
    /// artificially skip lanes that are only dead for a *different* branch.
    pub fn prefilter_batch(&self, source: &S, lanes: &mut LaneVec<S::LaneState>, alive: VectorMask) -> VectorMask {
        match self {
            FilterNode::Leaf(e) => e.prefilter_batch(source, lanes, alive),
            FilterNode::And(children) => {
                if children.is_empty() {
                    VectorMask::NONE_SET
                } else {
                    children.iter().fold(alive, |acc, c| acc & c.prefilter_batch(source, lanes, alive))
                }
            }
            FilterNode::Or(children) => children
                .iter()
                .fold(VectorMask::NONE_SET, |acc, c| acc | c.prefilter_batch(source, lanes, alive))
                & alive,
            FilterNode::Not(child) => !child.prefilter_batch(source, lanes, alive) & alive,
        }
    }

    pub fn verify_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        match self {
            FilterNode::Leaf(e) => e.verify_lane(source, lane),
            FilterNode::And(children) => !children.is_empty() && children.iter().all(|c| c.verify_lane(source, lane)),
            FilterNode::Or(children) => children.iter().any(|c| c.verify_lane(source, lane)),
            FilterNode::Not(child) => !child.verify_lane(source, lane),
        }
    }

    /// Occurrence count for scoring. A `should` clause is almost always a
    /// bare leaf; composite `should` clauses aggregate by summing their
    /// children's counts (`Not` falls back to a 0/1 count of its negation,
    /// since "how many times did this NOT happen" isn't a meaningful tally).
    pub fn count_lane(&self, source: &S, lane: &mut S::LaneState) -> u32 {
        match self {
            FilterNode::Leaf(e) => e.count_lane(source, lane),
            FilterNode::And(children) => children.iter().map(|c| c.count_lane(source, lane)).sum(),
            FilterNode::Or(children) => children.iter().map(|c| c.count_lane(source, lane)).sum(),
            FilterNode::Not(child) => u32::from(child.count_lane(source, lane) == 0),
        }
    }
}

/// The full compiled query: `must` (AND) and `must_not` (every child must
/// fail) gate pass/fail; `should` never gates — it only contributes to the
/// score of a seed that already passed must/must_not, weighted by the score
/// each clause carried in the original query.
pub struct FilterTree<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    pub must: Vec<FilterNode<S>>,
    pub must_not: Vec<FilterNode<S>>,
    pub should: Vec<(u32, FilterNode<S>)>,
}

impl<S> FilterTree<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState>,
{
    pub fn prefilter_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        if !self.must.iter().all(|n| n.prefilter_lane(source, lane)) {
            return false;
        }
        if self.must_not.iter().any(|n| n.prefilter_lane(source, lane)) {
            return false;
        }
        true
    }

    /// Narrows `alive` across the whole batch: every `must` node must keep a
    /// lane, every `must_not` node must drop it. This is the vector-wide
    /// entry point the search driver's `scan_batch` calls, in place of a
    /// scalar loop that recomputes a mask one lane at a time.
    pub fn prefilter_batch(&self, source: &S, lanes: &mut LaneVec<S::LaneState>, alive: VectorMask) -> VectorMask {
        let mut mask = alive;
        for n in &self.must {
            if mask.is_empty() {
                break;
            }
            mask = mask & n.prefilter_batch(source, lanes, mask);
        }
        if mask.is_empty() {
            return mask;
        }
        for n in &self.must_not {
            if mask.is_empty() {
                break;
            }
            mask = mask & !n.prefilter_batch(source, lanes, mask);
        }
        mask
    }

    /// Re-runs the exact check on a lane that already passed `prefilter_batch`.
    pub fn verify_lane(&self, source: &S, lane: &mut S::LaneState) -> bool {
        if !self.must.iter().all(|n| n.verify_lane(source, lane)) {
            return false;
        }
        if self.must_not.iter().any(|n| n.verify_lane(source, lane)) {
            return false;
        }
        true
    }

    /// Tally a lane that has already passed `verify_lane`: total score and
    /// the per-should-clause occurrence count, in query order.
    pub fn score_lane(&self, source: &S, lane: &mut S::LaneState) -> (u64, Vec<u32>) {
        let mut total = 0u64;
        let mut counts = Vec::with_capacity(self.should.len());
        for (weight, node) in &self.should {
            let count = node.count_lane(source, lane);
            total += u64::from(*weight) * u64::from(count);
            counts.push(count);
        }
        (total, counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A stand-in generation model whose stream methods are never actually
    /// called by these tests: combinator folding only needs `LaneVec`/
    /// `VectorMask` plumbing, not real item data, so every stream type is a
    /// unit and every accessor is unreachable.
    struct NoopSource;

    macro_rules! unreachable_stream {
        ($open:ident, $next:ident, $stream_ty:ident, $item:ty $(, $extra:ident: $extra_ty:ty)*) => {
            type $stream_ty = ();
            fn $open(&self, _lane: &mut Self::LaneState $(, $extra: $extra_ty)*) -> Self::$stream_ty {
                unreachable!("NoopSource streams are never opened in node.rs combinator tests")
            }
            fn $next(&self, _stream: &mut Self::$stream_ty) -> Option<$item> {
                unreachable!("NoopSource streams are never read in node.rs combinator tests")
            }
        };
    }

    impl seedscan_core::streams::ScalarItemStreamSource for NoopSource {
        type LaneState = usize;

        fn open_lane(&self, _seed: &seedscan_core::Seed) -> Self::LaneState {
            0
        }

        unreachable_stream!(open_shop_item_stream, next_shop_item, ShopJokerStream, seedscan_core::streams::JokerOutcome, ante: u8);
        unreachable_stream!(open_shop_tarot_stream, next_shop_tarot, ShopTarotStream, seedscan_core::streams::ShopItemOutcome, ante: u8);
        unreachable_stream!(open_shop_spectral_stream, next_shop_spectral, ShopSpectralStream, seedscan_core::streams::ShopItemOutcome, ante: u8);
        unreachable_stream!(open_shop_planet_stream, next_shop_planet, ShopPlanetStream, seedscan_core::streams::ShopItemOutcome, ante: u8);
        unreachable_stream!(open_booster_pack_stream, next_booster_pack, PackStream, seedscan_core::streams::PackOutcome, ante: u8);
        unreachable_stream!(open_arcana_pack_tarot_stream, next_arcana_pack_contents, ArcanaPackStream, seedscan_core::streams::CardOutcome, pack_index: u32);
        unreachable_stream!(open_celestial_pack_planet_stream, next_celestial_pack_contents, CelestialPackStream, seedscan_core::streams::CardOutcome, pack_index: u32);
        unreachable_stream!(open_spectral_pack_stream, next_spectral_pack_contents, SpectralPackStream, seedscan_core::streams::CardOutcome, pack_index: u32);
        unreachable_stream!(open_standard_pack_card_stream, next_standard_pack_contents, StandardPackStream, seedscan_core::streams::PlayingCardOutcome, pack_index: u32);
        unreachable_stream!(open_buffoon_pack_joker_stream, next_buffoon_pack_contents, BuffoonPackStream, seedscan_core::streams::JokerOutcome, pack_index: u32);
        unreachable_stream!(open_tag_stream, next_tag, TagStream, seedscan_core::streams::TagOutcome, ante: u8);
        unreachable_stream!(open_soul_joker_stream, next_soul_joker, SoulJokerStream, seedscan_core::streams::JokerOutcome, ante: u8);

        fn next_arcana_pack_has_soul(&self, _stream: &mut Self::ArcanaPackStream) -> bool {
            unreachable!()
        }
        fn next_spectral_pack_has_soul(&self, _stream: &mut Self::SpectralPackStream) -> bool {
            unreachable!()
        }
        fn ante_first_voucher(&self, _lane: &mut Self::LaneState, _ante: u8) -> seedscan_core::streams::VoucherOutcome {
            unreachable!()
        }
        fn ante_boss(&self, _lane: &mut Self::LaneState, _ante: u8) -> seedscan_core::Boss {
            unreachable!()
        }
        fn apply_voucher_effect(&self, _lane: &mut Self::LaneState, _voucher: &seedscan_core::streams::VoucherOutcome) {
            unreachable!()
        }
    }

    fn lanes() -> LaneVec<usize> {
        LaneVec::build(|i| i)
    }

    /// A leaf whose `prefilter_lane`/`verify_lane`/`count_lane` are driven by
    /// fixed per-lane tables, so combinator tests don't need a real evaluator.
    struct FixedEvaluator {
        passes: [bool; 8],
        counts: [u32; 8],
    }

    impl FixedEvaluator {
        fn all(value: bool) -> Self {
            FixedEvaluator { passes: [value; 8], counts: [u32::from(value); 8] }
        }

        fn only(lane: usize) -> Self {
            let mut passes = [false; 8];
            passes[lane] = true;
            let mut counts = [0; 8];
            counts[lane] = 1;
            FixedEvaluator { passes, counts }
        }
    }

    impl ClauseEvaluator<NoopSource> for FixedEvaluator {
        fn prefilter_lane(&self, _source: &NoopSource, lane: &mut usize) -> bool {
            self.passes[*lane]
        }

        fn count_lane(&self, _source: &NoopSource, lane: &mut usize) -> u32 {
            self.counts[*lane]
        }
    }

    fn leaf(e: FixedEvaluator) -> FilterNode<NoopSource> {
        FilterNode::Leaf(Box::new(e))
    }

    #[test]
    fn an_empty_and_group_fails_every_lane_instead_of_vacuously_passing() {
        let node: FilterNode<NoopSource> = FilterNode::And(Vec::new());
        let source = NoopSource;
        let mut lane = 0usize;
        assert!(!node.prefilter_lane(&source, &mut lane));
        assert!(!node.verify_lane(&source, &mut lane));
        let mut lv = lanes();
        assert!(node.prefilter_batch(&source, &mut lv, VectorMask::ALL_SET).is_empty());
    }

    #[test]
    fn an_empty_or_group_fails_every_lane() {
        let node: FilterNode<NoopSource> = FilterNode::Or(Vec::new());
        let source = NoopSource;
        let mut lane = 0usize;
        assert!(!node.prefilter_lane(&source, &mut lane));
        let mut lv = lanes();
        assert!(node.prefilter_batch(&source, &mut lv, VectorMask::ALL_SET).is_empty());
    }

    #[test]
    fn not_negates_its_child_lanewise() {
        let node = FilterNode::Not(Box::new(leaf(FixedEvaluator::only(3))));
        let source = NoopSource;
        let mut lv = lanes();
        let out = node.prefilter_batch(&source, &mut lv, VectorMask::ALL_SET);
        assert!(!out.test(3));
        for i in [0, 1, 2, 4, 5, 6, 7] {
            assert!(out.test(i));
        }
    }

    #[test]
    fn and_batch_requires_every_child_to_keep_a_lane() {
        let node = FilterNode::And(vec![leaf(FixedEvaluator::only(2)), leaf(FixedEvaluator::only(5))]);
        let source = NoopSource;
        let mut lv = lanes();
        let out = node.prefilter_batch(&source, &mut lv, VectorMask::ALL_SET);
        assert!(out.is_empty());
    }

    #[test]
    fn and_batch_keeps_a_lane_every_child_agrees_on() {
        let node = FilterNode::And(vec![leaf(FixedEvaluator::all(true)), leaf(FixedEvaluator::only(4))]);
        let source = NoopSource;
        let mut lv = lanes();
        let out = node.prefilter_batch(&source, &mut lv, VectorMask::ALL_SET);
        assert_eq!(out.bits(), VectorMask::lane(4).bits());
    }

    #[test]
    fn or_batch_unions_children_then_clamps_to_alive() {
        let node = FilterNode::Or(vec![leaf(FixedEvaluator::only(1)), leaf(FixedEvaluator::only(6))]);
        let source = NoopSource;
        let mut lv = lanes();
        let restricted = VectorMask::from_bits(0b0000_0010); // only lane 1 alive going in
        let out = node.prefilter_batch(&source, &mut lv, restricted);
        // lane 6 would satisfy the second child in isolation, but it was
        // never alive for this call, so it must not reappear in the result.
        assert_eq!(out.bits(), VectorMask::lane(1).bits());
    }

    #[test]
    fn count_lane_sums_across_and_and_or_children() {
        let and_node = FilterNode::And(vec![leaf(FixedEvaluator::all(true)), leaf(FixedEvaluator::all(true))]);
        let or_node = FilterNode::Or(vec![leaf(FixedEvaluator::all(true)), leaf(FixedEvaluator::all(true))]);
        let source = NoopSource;
        let mut lane = 0usize;
        assert_eq!(and_node.count_lane(&source, &mut lane), 2);
        assert_eq!(or_node.count_lane(&source, &mut lane), 2);
    }

    #[test]
    fn count_lane_not_reports_zero_or_one_never_a_negated_tally() {
        let zero_child = FilterNode::Not(Box::new(leaf(FixedEvaluator::all(false))));
        let nonzero_child = FilterNode::Not(Box::new(leaf(FixedEvaluator::all(true))));
        let source = NoopSource;
        let mut lane = 0usize;
        assert_eq!(zero_child.count_lane(&source, &mut lane), 1);
        assert_eq!(nonzero_child.count_lane(&source, &mut lane), 0);
    }

    #[test]
    fn filter_tree_must_not_rejects_a_lane_a_must_not_node_keeps() {
        let tree = FilterTree {
            must: vec![leaf(FixedEvaluator::all(true))],
            must_not: vec![leaf(FixedEvaluator::only(3))],
            should: Vec::new(),
        };
        let source = NoopSource;
        let mut lv = lanes();
        let out = tree.prefilter_batch(&source, &mut lv, VectorMask::ALL_SET);
        assert!(!out.test(3));
        assert!(out.test(0));
    }

    #[test]
    fn filter_tree_score_lane_weights_should_clauses_by_their_score() {
        let tree = FilterTree {
            must: Vec::new(),
            must_not: Vec::new(),
            should: vec![(3, leaf(FixedEvaluator::all(true))), (5, leaf(FixedEvaluator::all(false)))],
        };
        let source = NoopSource;
        let mut lane = 0usize;
        let (total, counts) = tree.score_lane(&source, &mut lane);
        assert_eq!(total, 3);
        assert_eq!(counts, vec![1, 0]);
    }

}
