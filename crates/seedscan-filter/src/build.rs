//! Compiles a validated [`Query`] into a [`FilterTree`] (C2 dispatch lives in
//! [`crate::category`]): one [`ClauseEvaluator`](crate::node::ClauseEvaluator)
//! per leaf clause, combinators expanded once here rather than re-walked per
//! seed.

use seedscan_core::clause::{Clause, ClauseMode};
use seedscan_core::query::Query;
use seedscan_core::streams::{ItemStreamSource, ScalarItemStreamSource};

use crate::category::build_leaf;
use crate::node::{FilterNode, FilterTree};

/// Build the filter tree for a query that has already passed
/// [`crate::validate::validate`]. Callers should not build a tree from a
/// query whose report failed; behavior on an invalid query is unspecified.
pub fn build_filter_tree<S>(query: &Query) -> FilterTree<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState> + 'static,
{
    FilterTree {
        must: query.must.iter().map(build_node).collect(),
        must_not: query.must_not.iter().map(build_node).collect(),
        should: query.should.iter().map(|c| (c.score, build_node(c))).collect(),
    }
}

fn build_node<S>(clause: &Clause) -> FilterNode<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState> + 'static,
{
    if let Some(mode) = clause.mode {
        if mode == ClauseMode::And {
            if let Some(group_antes) = clause.group_antes {
                return build_and_group(&clause.nested, group_antes);
            }
        }
        let mut children = clause.nested.iter().map(build_node);
        return match mode {
            ClauseMode::And => FilterNode::And(children.collect()),
            ClauseMode::Or => FilterNode::Or(children.collect()),
            ClauseMode::Not => FilterNode::Not(Box::new(
                children.next().expect("a `not` clause always has exactly one child by construction"),
            )),
        };
    }
    FilterNode::Leaf(build_leaf(clause))
}

/// Expands an `and`-group clause carrying an explicit `antes` override into
/// one `And` branch per ante in `group_antes`, each holding the group's
/// children restricted to that single ante, all joined by `Or` — "this
/// whole group must hold, but only needs to for one of these antes" rather
/// than "every child independently spans every ante in the group".
fn build_and_group<S>(children: &[Clause], group_antes: seedscan_core::clause::AnteSet) -> FilterNode<S>
where
    S: ItemStreamSource + ScalarItemStreamSource<LaneState = <S as ItemStreamSource>::LaneState> + 'static,
{
    let branches = group_antes
        .iter()
        .map(|ante| {
            let restricted: Vec<Clause> = children.iter().map(|c| c.restricted_to_ante(ante)).collect();
            FilterNode::And(restricted.iter().map(build_node).collect())
        })
        .collect();
    FilterNode::Or(branches)
}
