//! Category mapper/factory (C2): turns a normalized leaf [`Clause`] into the
//! [`ClauseEvaluator`] that knows how to check it, and groups a flat clause
//! list by category preserving input order — the shape [`build`](crate::build)
//! consumes when it compiles a query's `must`/`must_not`/`should` lists.

use std::collections::BTreeMap;

use seedscan_core::clause::Clause;
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};
use seedscan_core::ItemCategory;

use crate::filters::{
    BossEvaluator, JokerEvaluator, PlanetEvaluator, PlayingCardEvaluator, SoulJokerEvaluator,
    SpectralEvaluator, TagEvaluator, TarotEvaluator, VoucherEvaluator,
};
use crate::node::ClauseEvaluator;

/// Builds the one evaluator `clause.category` dispatches to. Every
/// concrete evaluator clones `clause` into itself; none of them borrow the
/// query after this call.
pub fn build_leaf<S>(clause: &Clause) -> Box<dyn ClauseEvaluator<S>>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState> + 'static,
{
    let clause = clause.clone();
    match clause.category {
        ItemCategory::Joker => Box::new(JokerEvaluator { clause }),
        ItemCategory::SoulJoker => Box::new(SoulJokerEvaluator { clause }),
        ItemCategory::Tarot => Box::new(TarotEvaluator { clause }),
        ItemCategory::Planet => Box::new(PlanetEvaluator { clause }),
        ItemCategory::Spectral => Box::new(SpectralEvaluator { clause }),
        ItemCategory::PlayingCard => Box::new(PlayingCardEvaluator { clause }),
        ItemCategory::Voucher => Box::new(VoucherEvaluator { clause }),
        ItemCategory::Tag => Box::new(TagEvaluator { clause }),
        ItemCategory::Boss => Box::new(BossEvaluator { clause }),
    }
}

/// Groups `clauses` by category, preserving the relative order clauses of
/// the same category appeared in within `clauses`. `BTreeMap` gives a
/// deterministic category iteration order, which matters for any future
/// per-category batching (see `crate::build`) that wants to process
/// categories in a stable sequence rather than HashMap's unspecified one.
pub fn group_by_category(clauses: &[Clause]) -> BTreeMap<ItemCategory, Vec<&Clause>> {
    let mut groups: BTreeMap<ItemCategory, Vec<&Clause>> = BTreeMap::new();
    for clause in clauses {
        groups.entry(clause.category).or_default().push(clause);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscan_core::clause::ItemValue;

    fn leaf(category: ItemCategory, value: &str) -> Clause {
        Clause::leaf(category, ItemValue::parse(value, category).unwrap())
    }

    #[test]
    fn group_by_category_preserves_input_order_within_a_group() {
        let clauses = vec![
            leaf(ItemCategory::Joker, "Blueprint"),
            leaf(ItemCategory::Tarot, "TheFool"),
            leaf(ItemCategory::Joker, "Mime"),
        ];
        let groups = group_by_category(&clauses);
        let jokers = &groups[&ItemCategory::Joker];
        assert_eq!(jokers.len(), 2);
        assert_eq!(jokers[0].value, ItemValue::Named("Blueprint".into()));
        assert_eq!(jokers[1].value, ItemValue::Named("Mime".into()));
    }
}
