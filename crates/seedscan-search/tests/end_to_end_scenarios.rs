//! Pins the scoring driver against the concrete scenarios in the query
//! spec's worked examples: a bare must clause, a must/should/must_not mix
//! with scoring, and auto-cutoff convergence across many seeds.

use std::collections::HashMap;

use seedscan_core::clause::{AnteSet, Clause, ItemValue, SlotMask};
use seedscan_core::query::Query;
use seedscan_core::streams::{
    JokerOutcome, ScalarItemStreamSource, TagOutcome, VoucherOutcome,
};
use seedscan_core::{Deck, ItemCategory, Rarity, Seed, Stake};
use seedscan_filter::build_filter_tree;
use seedscan_search::{search_range, SearchSession};

/// Per-seed scripted content: enough of the item-generation surface to drive
/// voucher, joker, and tag clauses. Anything not inserted for a seed reads
/// back as empty, the same "nothing happened" default the real model would
/// give a shop/ante the query never asked about.
#[derive(Default, Clone)]
struct SeedFixture {
    shop_jokers: HashMap<u8, Vec<JokerOutcome>>,
    tags: HashMap<u8, Vec<TagOutcome>>,
    vouchers: HashMap<u8, VoucherOutcome>,
}

#[derive(Default)]
struct FixtureSource {
    seeds: HashMap<Seed, SeedFixture>,
}

impl FixtureSource {
    fn fixture(&self, seed: &Seed) -> SeedFixture {
        self.seeds.get(seed).cloned().unwrap_or_default()
    }
}

impl ScalarItemStreamSource for FixtureSource {
    type LaneState = Seed;

    fn open_lane(&self, seed: &Seed) -> Self::LaneState {
        *seed
    }

    type ShopJokerStream = std::vec::IntoIter<JokerOutcome>;
    fn open_shop_item_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopJokerStream {
        self.fixture(lane).shop_jokers.get(&ante).cloned().unwrap_or_default().into_iter()
    }
    fn next_shop_item(&self, stream: &mut Self::ShopJokerStream) -> Option<JokerOutcome> {
        stream.next()
    }

    type ShopTarotStream = std::vec::IntoIter<seedscan_core::streams::ShopItemOutcome>;
    fn open_shop_tarot_stream(&self, _lane: &mut Self::LaneState, _ante: u8) -> Self::ShopTarotStream {
        Vec::new().into_iter()
    }
    fn next_shop_tarot(
        &self,
        stream: &mut Self::ShopTarotStream,
    ) -> Option<seedscan_core::streams::ShopItemOutcome> {
        stream.next()
    }

    type ShopSpectralStream = std::vec::IntoIter<seedscan_core::streams::ShopItemOutcome>;
    fn open_shop_spectral_stream(
        &self,
        _lane: &mut Self::LaneState,
        _ante: u8,
    ) -> Self::ShopSpectralStream {
        Vec::new().into_iter()
    }
    fn next_shop_spectral(
        &self,
        stream: &mut Self::ShopSpectralStream,
    ) -> Option<seedscan_core::streams::ShopItemOutcome> {
        stream.next()
    }

    type ShopPlanetStream = std::vec::IntoIter<seedscan_core::streams::ShopItemOutcome>;
    fn open_shop_planet_stream(&self, _lane: &mut Self::LaneState, _ante: u8) -> Self::ShopPlanetStream {
        Vec::new().into_iter()
    }
    fn next_shop_planet(
        &self,
        stream: &mut Self::ShopPlanetStream,
    ) -> Option<seedscan_core::streams::ShopItemOutcome> {
        stream.next()
    }

    type PackStream = std::vec::IntoIter<seedscan_core::streams::PackOutcome>;
    fn open_booster_pack_stream(&self, _lane: &mut Self::LaneState, _ante: u8) -> Self::PackStream {
        Vec::new().into_iter()
    }
    fn next_booster_pack(
        &self,
        stream: &mut Self::PackStream,
    ) -> Option<seedscan_core::streams::PackOutcome> {
        stream.next()
    }

    type ArcanaPackStream = std::vec::IntoIter<seedscan_core::streams::CardOutcome>;
    fn open_arcana_pack_tarot_stream(
        &self,
        _lane: &mut Self::LaneState,
        _pack_index: u32,
    ) -> Self::ArcanaPackStream {
        Vec::new().into_iter()
    }
    fn next_arcana_pack_contents(
        &self,
        stream: &mut Self::ArcanaPackStream,
    ) -> Option<seedscan_core::streams::CardOutcome> {
        stream.next()
    }
    fn next_arcana_pack_has_soul(&self, _stream: &mut Self::ArcanaPackStream) -> bool {
        false
    }

    type CelestialPackStream = std::vec::IntoIter<seedscan_core::streams::CardOutcome>;
    fn open_celestial_pack_planet_stream(
        &self,
        _lane: &mut Self::LaneState,
        _pack_index: u32,
    ) -> Self::CelestialPackStream {
        Vec::new().into_iter()
    }
    fn next_celestial_pack_contents(
        &self,
        stream: &mut Self::CelestialPackStream,
    ) -> Option<seedscan_core::streams::CardOutcome> {
        stream.next()
    }

    type SpectralPackStream = std::vec::IntoIter<seedscan_core::streams::CardOutcome>;
    fn open_spectral_pack_stream(
        &self,
        _lane: &mut Self::LaneState,
        _pack_index: u32,
    ) -> Self::SpectralPackStream {
        Vec::new().into_iter()
    }
    fn next_spectral_pack_contents(
        &self,
        stream: &mut Self::SpectralPackStream,
    ) -> Option<seedscan_core::streams::CardOutcome> {
        stream.next()
    }
    fn next_spectral_pack_has_soul(&self, _stream: &mut Self::SpectralPackStream) -> bool {
        false
    }

    type StandardPackStream = std::vec::IntoIter<seedscan_core::streams::PlayingCardOutcome>;
    fn open_standard_pack_card_stream(
        &self,
        _lane: &mut Self::LaneState,
        _pack_index: u32,
    ) -> Self::StandardPackStream {
        Vec::new().into_iter()
    }
    fn next_standard_pack_contents(
        &self,
        stream: &mut Self::StandardPackStream,
    ) -> Option<seedscan_core::streams::PlayingCardOutcome> {
        stream.next()
    }

    type BuffoonPackStream = std::vec::IntoIter<JokerOutcome>;
    fn open_buffoon_pack_joker_stream(
        &self,
        _lane: &mut Self::LaneState,
        _pack_index: u32,
    ) -> Self::BuffoonPackStream {
        Vec::new().into_iter()
    }
    fn next_buffoon_pack_contents(&self, stream: &mut Self::BuffoonPackStream) -> Option<JokerOutcome> {
        stream.next()
    }

    type TagStream = std::vec::IntoIter<TagOutcome>;
    fn open_tag_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::TagStream {
        self.fixture(lane).tags.get(&ante).cloned().unwrap_or_default().into_iter()
    }
    fn next_tag(&self, stream: &mut Self::TagStream) -> Option<TagOutcome> {
        stream.next()
    }

    type SoulJokerStream = std::vec::IntoIter<JokerOutcome>;
    fn open_soul_joker_stream(&self, _lane: &mut Self::LaneState, _ante: u8) -> Self::SoulJokerStream {
        Vec::new().into_iter()
    }
    fn next_soul_joker(&self, stream: &mut Self::SoulJokerStream) -> Option<JokerOutcome> {
        stream.next()
    }

    fn ante_first_voucher(&self, lane: &mut Self::LaneState, ante: u8) -> VoucherOutcome {
        self.fixture(lane).vouchers.get(&ante).cloned().unwrap_or(VoucherOutcome { id: "none".into() })
    }

    fn ante_boss(&self, _lane: &mut Self::LaneState, _ante: u8) -> seedscan_core::Boss {
        seedscan_core::Boss::TheHook
    }

    fn apply_voucher_effect(&self, _lane: &mut Self::LaneState, _voucher: &VoucherOutcome) {}
}

fn ante(n: u8) -> AnteSet {
    AnteSet::from_antes([n]).unwrap()
}

fn seed_at(index: u64) -> Seed {
    Seed::from_index(index)
}

/// Scenario 1: a bare voucher must-clause over a batch of 8 seeds. Only the
/// lanes whose ante-1 voucher is the named one survive, each with score 0
/// and no per-clause counts (there are no `should` clauses).
#[test]
fn voucher_must_clause_returns_only_matching_lanes_with_zero_score() {
    let mut source = FixtureSource::default();
    let matching = seed_at(0);
    let other = seed_at(1);
    source.seeds.insert(
        matching,
        SeedFixture { vouchers: HashMap::from([(1, VoucherOutcome { id: "Telescope".into() })]), ..Default::default() },
    );
    source.seeds.insert(
        other,
        SeedFixture { vouchers: HashMap::from([(1, VoucherOutcome { id: "Overstock".into() })]), ..Default::default() },
    );

    let mut query = Query::new(Deck::Red, Stake::White);
    let mut clause = Clause::leaf(ItemCategory::Voucher, ItemValue::Named("Telescope".into()));
    clause.antes = ante(1);
    query.must.push(clause);

    let tree = build_filter_tree::<FixtureSource>(&query);
    let session = SearchSession::new(0, false);

    let mut results = Vec::new();
    search_range(&source, &tree, 0, 8, &session, |r| results.push(r)).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].seed, matching);
    assert_eq!(results[0].score, 0);
    assert!(results[0].per_clause_counts.is_empty());
}

/// Scenario 3: Blueprint must in shop slots 0-3, Brainstorm should (weight
/// 5) in the same slots, no Negative tag must_not. Score is 5x the number
/// of Brainstorm appearances.
#[test]
fn must_should_and_must_not_combine_into_a_weighted_score() {
    let mut source = FixtureSource::default();
    let winner = seed_at(10);
    source.seeds.insert(
        winner,
        SeedFixture {
            shop_jokers: HashMap::from([(
                1,
                vec![
                    JokerOutcome { id: "Blueprint".into(), rarity: Rarity::Rare, edition: None, sticker: None },
                    JokerOutcome { id: "Brainstorm".into(), rarity: Rarity::Rare, edition: None, sticker: None },
                    JokerOutcome { id: "Brainstorm".into(), rarity: Rarity::Rare, edition: None, sticker: None },
                ],
            )]),
            ..Default::default()
        },
    );
    let tagged_out = seed_at(11);
    source.seeds.insert(
        tagged_out,
        SeedFixture {
            shop_jokers: HashMap::from([(
                1,
                vec![JokerOutcome { id: "Blueprint".into(), rarity: Rarity::Rare, edition: None, sticker: None }],
            )]),
            tags: HashMap::from([(1, vec![TagOutcome { id: "NegativeTag".into() }])]),
            ..Default::default()
        },
    );

    let mut query = Query::new(Deck::Red, Stake::White);
    let mut must = Clause::leaf(ItemCategory::Joker, ItemValue::Named("Blueprint".into()));
    must.shop_slots = SlotMask::from_slots([0, 1, 2, 3]).unwrap();
    query.must.push(must);

    let mut should = Clause::leaf(ItemCategory::Joker, ItemValue::Named("Brainstorm".into()));
    should.shop_slots = SlotMask::from_slots([0, 1, 2, 3]).unwrap();
    should.score = 5;
    query.should.push(should);

    let must_not = Clause::leaf(ItemCategory::Tag, ItemValue::Named("NegativeTag".into()));
    query.must_not.push(must_not);

    let tree = build_filter_tree::<FixtureSource>(&query);
    let session = SearchSession::new(0, false);

    let mut results = Vec::new();
    search_range(&source, &tree, 10, 2, &session, |r| results.push(r)).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].seed, winner);
    assert_eq!(results[0].score, 10);
    assert_eq!(results[0].per_clause_counts, vec![2]);
}

/// Scenario 6: with auto-cutoff on, the learned cutoff only ever rises to
/// the best score seen, and every result reported after it has been raised
/// meets or exceeds it.
#[test]
fn auto_cutoff_rises_to_the_best_score_seen_and_gates_later_results() {
    let mut source = FixtureSource::default();
    for i in 0..64u64 {
        let count = (i % 6) as usize;
        let jokers = (0..count)
            .map(|_| JokerOutcome {
                id: "Brainstorm".into(),
                rarity: Rarity::Rare,
                edition: None,
                sticker: None,
            })
            .collect();
        source.seeds.insert(seed_at(i), SeedFixture { shop_jokers: HashMap::from([(1, jokers)]), ..Default::default() });
    }

    let mut query = Query::new(Deck::Red, Stake::White);
    let mut should = Clause::leaf(ItemCategory::Joker, ItemValue::Named("Brainstorm".into()));
    should.score = 10;
    query.should.push(should);

    let tree = build_filter_tree::<FixtureSource>(&query);
    let session = SearchSession::new(1, true);

    let mut results = Vec::new();
    search_range(&source, &tree, 0, 64, &session, |r| results.push(r)).unwrap();

    assert_eq!(session.cutoff(), 50);
    assert!(results.iter().all(|r| r.score >= 1));
    assert!(results.iter().any(|r| r.score == 50));
}
