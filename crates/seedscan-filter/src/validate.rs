//! Cross-clause validation: collects every problem with a query before the
//! search ever starts, rather than failing fast on the first one.

use seedscan_core::clause::{Clause, ClauseMode};
use seedscan_core::query::Query;
use seedscan_core::{ItemCategory, ItemValue};

/// Categories an `edition` constraint means anything for; Balatro only ever
/// stamps an edition on these item kinds.
const EDITION_CATEGORIES: [ItemCategory; 6] = [
    ItemCategory::Joker,
    ItemCategory::SoulJoker,
    ItemCategory::PlayingCard,
    ItemCategory::Tarot,
    ItemCategory::Planet,
    ItemCategory::Spectral,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Where in the query a problem was found, as a path of list-name + index
/// pairs (e.g. `must[2].nested[0]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClausePath(pub Vec<(&'static str, usize)>);

impl core::fmt::Display for ClausePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<query>");
        }
        for (i, (list, idx)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{list}[{idx}]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub path: ClausePath,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn pass(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    fn push(&mut self, severity: Severity, path: ClausePath, message: impl Into<String>) {
        self.issues.push(ValidationIssue { severity, path, message: message.into() });
    }
}

/// Run every check against `query` and return a fully populated report.
pub fn validate(query: &Query) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_non_empty(query, &mut report);
    check_any_legendary_placement(query, &mut report);
    check_slot_bounds(query, &mut report);
    check_soul_joker_has_no_shop_slots(query, &mut report);
    check_edition_scope(query, &mut report);
    check_require_mega_scope(query, &mut report);
    check_min_count(query, &mut report);
    check_composite_shape(query, &mut report);
    check_empty_antes(query, &mut report);
    check_should_score(query, &mut report);
    sort_issues_stably(&mut report.issues);
    report
}

fn check_non_empty(query: &Query, report: &mut ValidationReport) {
    if query.must.is_empty() && query.must_not.is_empty() && query.should.is_empty() {
        report.push(
            Severity::Error,
            ClausePath(Vec::new()),
            "a query must contain at least one clause across must/must_not/should",
        );
    }
}

fn walk(list: &'static str, clauses: &[Clause], prefix: &[(&'static str, usize)], f: &mut impl FnMut(&Clause, ClausePath)) {
    for (i, c) in clauses.iter().enumerate() {
        let mut path = prefix.to_vec();
        path.push((list, i));
        f(c, ClausePath(path.clone()));
        walk("nested", &c.nested, &path, f);
    }
}

fn for_each_clause(query: &Query, mut f: impl FnMut(&Clause, ClausePath)) {
    walk("must", &query.must, &[], &mut f);
    walk("must_not", &query.must_not, &[], &mut f);
    walk("should", &query.should, &[], &mut f);
}

fn check_any_legendary_placement(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.category == ItemCategory::SoulJoker && matches!(c.value, ItemValue::AnyLegendary) {
            report.push(
                Severity::Error,
                path,
                "any_legendary is not a valid value for a souljoker clause (souljoker slots are always legendary)",
            );
        }
    });
}

/// Categories with no slot concept at all: vouchers, tags, and bosses are
/// each offered exactly once per ante, never at a numbered shop/pack index.
const NO_SLOT_CATEGORIES: [ItemCategory; 3] = [ItemCategory::Voucher, ItemCategory::Tag, ItemCategory::Boss];

fn check_slot_bounds(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if NO_SLOT_CATEGORIES.contains(&c.category) {
            if !c.shop_slots.is_any() || !c.pack_slots.is_any() {
                report.push(
                    Severity::Warning,
                    path.clone(),
                    "slot restrictions on this clause are ignored (this category has no slot index)",
                );
            }
            return;
        }
        if c.category == ItemCategory::PlayingCard && !c.shop_slots.is_any() {
            report.push(
                Severity::Warning,
                path,
                "shopSlots on a playingcard clause are ignored (playing cards are never sold in the shop)",
            );
        }
    });
}

/// Soul jokers resolve from a Spectral/Arcana pack draw, never from a shop
/// slot; a `shopSlots` restriction on one can never be satisfied.
fn check_soul_joker_has_no_shop_slots(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.category == ItemCategory::SoulJoker && !c.shop_slots.is_any() {
            report.push(
                Severity::Error,
                path,
                "a souljoker clause must not set shopSlots (souljokers never occupy a shop slot)",
            );
        }
    });
}

fn check_edition_scope(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.edition.is_some() && !EDITION_CATEGORIES.contains(&c.category) {
            report.push(
                Severity::Error,
                path,
                "edition is only meaningful on joker, souljoker, playingcard, tarot, planet, and spectral clauses",
            );
        }
    });
}

/// `requireMega` only means anything for categories whose items can come
/// from a booster pack at all; vouchers, tags, and boss blinds never do, and
/// a souljoker's pack is gated separately (by `packSlots`, not pack size).
fn check_require_mega_scope(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.require_mega
            && matches!(
                c.category,
                ItemCategory::Voucher | ItemCategory::Tag | ItemCategory::Boss | ItemCategory::SoulJoker
            )
        {
            report.push(
                Severity::Warning,
                path,
                "requireMega has no effect on this category's clause",
            );
        }
    });
}

fn check_min_count(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.min_count == 0 {
            report.push(Severity::Error, path, "min_count must be at least 1");
        }
        if c.min_count > 1 && matches!(c.category, ItemCategory::Voucher | ItemCategory::Boss) {
            report.push(
                Severity::Warning,
                path,
                "min_count greater than 1 has no effect on a clause that can match at most once per ante",
            );
        }
    });
}

fn check_composite_shape(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.mode.is_some() && c.nested.is_empty() {
            report.push(Severity::Error, path, "a composite clause must have at least one nested clause");
        }
        if c.mode.is_none() && !c.nested.is_empty() {
            report.push(Severity::Error, path, "a clause with nested children must set and/or mode");
        }
        if matches!(c.mode, Some(ClauseMode::Or)) && c.nested.len() < 2 {
            report.push(Severity::Warning, path.clone(), "an `or` group with fewer than two children is equivalent to its single child");
        }
        if matches!(c.mode, Some(ClauseMode::Not)) && c.nested.len() != 1 {
            report.push(Severity::Error, path, "a `not` clause must have exactly one nested clause");
        }
    });
}

fn check_should_score(query: &Query, report: &mut ValidationReport) {
    for (i, c) in query.should.iter().enumerate() {
        if c.score == 0 {
            report.push(
                Severity::Error,
                ClausePath(alloc_path("should", i)),
                "a should clause's score must be at least 1",
            );
        }
    }
}

fn alloc_path(list: &'static str, idx: usize) -> Vec<(&'static str, usize)> {
    let mut v = Vec::with_capacity(1);
    v.push((list, idx));
    v
}

fn check_empty_antes(query: &Query, report: &mut ValidationReport) {
    for_each_clause(query, |c, path| {
        if c.nested.is_empty() && c.antes.is_empty() {
            report.push(Severity::Error, path, "antes must not be empty");
        }
    });
}

/// Deterministic ordering for reported issues: errors before warnings, then
/// by clause path, then by message, so two runs over the same query always
/// report problems in the same order.
fn sort_issues_stably(issues: &mut Vec<ValidationIssue>) {
    issues.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.path.to_string().cmp(&b.path.to_string()))
            .then_with(|| a.message.cmp(&b.message))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscan_core::clause::{AnteSet, SlotMask};
    use seedscan_core::{Deck, Stake};

    fn joker(value: &str) -> Clause {
        Clause::leaf(ItemCategory::Joker, ItemValue::parse(value, ItemCategory::Joker).unwrap())
    }

    #[test]
    fn empty_query_is_an_error() {
        let q = Query::new(Deck::Red, Stake::White);
        let report = validate(&q);
        assert!(!report.pass());
    }

    #[test]
    fn single_valid_clause_passes() {
        let mut q = Query::new(Deck::Red, Stake::White);
        q.must.push(joker("Blueprint"));
        let report = validate(&q);
        assert!(report.pass(), "{:?}", report.issues);
    }

    #[test]
    fn any_legendary_on_soul_joker_is_rejected_at_parse_time_already() {
        // ItemValue::parse itself refuses this combination, so the validator
        // never even sees it; this just documents where the rejection lives.
        assert!(ItemValue::parse("any_legendary", ItemCategory::SoulJoker).is_err());
    }

    #[test]
    fn min_count_zero_is_an_error() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut c = joker("Blueprint");
        c.min_count = 0;
        q.must.push(c);
        let report = validate(&q);
        assert!(!report.pass());
        assert!(report.issues.iter().any(|i| i.message.contains("min_count")));
    }

    #[test]
    fn composite_without_mode_is_rejected() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut composite = joker("Blueprint");
        composite.nested = vec![joker("Mime")];
        composite.mode = None;
        q.must.push(composite);
        let report = validate(&q);
        assert!(!report.pass());
    }

    #[test]
    fn issues_are_sorted_errors_before_warnings() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut small_or = joker("Blueprint");
        small_or.mode = Some(ClauseMode::Or);
        small_or.nested = vec![joker("Mime")];
        q.must.push(small_or);
        let mut bad = joker("Mime");
        bad.min_count = 0;
        q.must.push(bad);
        let report = validate(&q);
        assert_eq!(report.issues[0].severity, Severity::Error);
    }

    #[test]
    fn voucher_clause_with_slots_warns() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut v = Clause::leaf(ItemCategory::Voucher, ItemValue::Named("hieroglyph".into()));
        v.shop_slots = SlotMask::from_slots([0]).unwrap();
        v.antes = AnteSet::from_antes([1]).unwrap();
        q.must.push(v);
        let report = validate(&q);
        assert!(report.pass());
        assert!(report.issues.iter().any(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn soul_joker_clause_with_shop_slots_is_an_error() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut c = Clause::leaf(ItemCategory::SoulJoker, ItemValue::Named("Canio".into()));
        c.shop_slots = SlotMask::from_slots([0]).unwrap();
        q.must.push(c);
        let report = validate(&q);
        assert!(!report.pass());
    }

    #[test]
    fn edition_outside_allowed_categories_is_an_error() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut c = Clause::leaf(ItemCategory::Tag, ItemValue::Named("investment".into()));
        c.edition = Some(seedscan_core::Edition::Foil);
        q.must.push(c);
        let report = validate(&q);
        assert!(!report.pass());
    }

    #[test]
    fn require_mega_on_boss_clause_warns() {
        let mut q = Query::new(Deck::Red, Stake::White);
        let mut c = Clause::leaf(ItemCategory::Boss, ItemValue::Named("TheWall".into()));
        c.require_mega = true;
        q.must.push(c);
        let report = validate(&q);
        assert!(report.pass());
        assert!(report.issues.iter().any(|i| i.severity == Severity::Warning));
    }
}
