//! A deterministic stand-in for the real Balatro item-generation model.
//!
//! `seedscan-core::streams::ScalarItemStreamSource` is the boundary to that
//! model, and deliberately does not ship one — the actual PRNG algorithm is
//! a separate collaborator this repo assumes exists. Without *some*
//! implementation plugged in, though, `seedscan` the binary has nothing to
//! run against, so this module derives everything a lane can be asked for
//! from a cheap integer hash of the seed's bytes. It produces *plausible*,
//! stable-per-seed output shaped like the real game's streams, and nothing
//! more — swap this module out for a real generation-rules crate before
//! trusting any result it finds. Implementing only the scalar trait is
//! enough: the batch `ItemStreamSource` the filter tree drives comes free
//! from the blanket scalar-fallback impl.

use seedscan_core::streams::{
    CardOutcome, ConsumableKind, JokerOutcome, PackKind, PackOutcome, PackSize, PlayingCardOutcome,
    ShopItemOutcome, TagOutcome, VoucherOutcome,
};
use seedscan_core::{Boss, Edition, Enhancement, Rank, Rarity, ScalarItemStreamSource, Seal, Seed, Suit};

const JOKERS: &[(&str, Rarity)] = &[
    ("Joker", Rarity::Common),
    ("GreedyJoker", Rarity::Common),
    ("LustyJoker", Rarity::Common),
    ("WrathfulJoker", Rarity::Common),
    ("GluttonousJoker", Rarity::Common),
    ("JollyJoker", Rarity::Common),
    ("DrollJoker", Rarity::Uncommon),
    ("Blueprint", Rarity::Rare),
    ("Brainstorm", Rarity::Rare),
    ("Mime", Rarity::Uncommon),
    ("Canio", Rarity::Legendary),
    ("Triboulet", Rarity::Legendary),
];

const TAROTS: &[&str] = &[
    "TheFool", "TheMagician", "TheHighPriestess", "TheEmpress", "TheEmperor", "TheHierophant",
];
const PLANETS: &[&str] = &["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn"];
const SPECTRALS: &[&str] = &["Familiar", "Grim", "Incantation", "Talisman", "Aura", "Wraith"];
const TAGS: &[&str] = &["Uncommon", "Rare", "Negative", "Foil", "Holographic", "Polychrome"];
const VOUCHERS: &[&str] = &["Overstock", "ClearanceSale", "Hieroglyph", "Petroglyph", "Telescope"];
const BOSSES: &[Boss] = &[
    Boss::TheHook,
    Boss::TheOx,
    Boss::TheHouse,
    Boss::TheWall,
    Boss::TheWheel,
    Boss::TheArm,
    Boss::TheClub,
];
const SUITS: &[Suit] = &[Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
const RANKS: &[Rank] = &[
    Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight,
    Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
];

/// `splitmix64`: cheap, well-distributed, and good enough to keep every
/// stream's output looking independent of its neighbors for demo purposes.
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn seed_hash(seed: &Seed) -> u64 {
    seed.as_str().bytes().fold(0xCBF29CE484222325u64, |acc, b| {
        splitmix64(acc ^ b as u64)
    })
}

pub struct DemoLaneState {
    base: u64,
    draws: u64,
}

pub struct DemoStream {
    rng: u64,
    remaining: u32,
}

impl DemoStream {
    fn new(seed: u64, avg_len: u32) -> Self {
        let rng = splitmix64(seed);
        let remaining = 1 + (rng % (avg_len as u64 * 2).max(1)) as u32;
        DemoStream { rng, remaining }
    }

    fn next_u64(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.rng = splitmix64(self.rng);
        Some(self.rng)
    }
}

/// Demonstration-only backend: deterministic per seed, not a model of the
/// real game's RNG. See the module doc comment.
pub struct DemoItemSource;

impl DemoItemSource {
    fn open(&self, lane: &mut DemoLaneState, tag: u64) -> DemoStream {
        lane.draws += 1;
        DemoStream::new(lane.base ^ tag ^ lane.draws, 4)
    }
}

impl ScalarItemStreamSource for DemoItemSource {
    type LaneState = DemoLaneState;

    fn open_lane(&self, seed: &Seed) -> Self::LaneState {
        DemoLaneState { base: seed_hash(seed), draws: 0 }
    }

    type ShopJokerStream = DemoStream;
    fn open_shop_item_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopJokerStream {
        self.open(lane, 0x1000 ^ ante as u64)
    }
    fn next_shop_item(&self, stream: &mut Self::ShopJokerStream) -> Option<JokerOutcome> {
        stream.next_u64().map(|r| {
            let (id, rarity) = JOKERS[(r as usize) % JOKERS.len()];
            JokerOutcome { id: id.into(), rarity, edition: None, sticker: None }
        })
    }

    type ShopTarotStream = DemoStream;
    fn open_shop_tarot_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopTarotStream {
        self.open(lane, 0x2000 ^ ante as u64)
    }
    fn next_shop_tarot(&self, stream: &mut Self::ShopTarotStream) -> Option<ShopItemOutcome> {
        stream.next_u64().map(|r| ShopItemOutcome {
            kind: ConsumableKind::Tarot,
            id: TAROTS[(r as usize) % TAROTS.len()].into(),
            edition: None,
        })
    }

    type ShopSpectralStream = DemoStream;
    fn open_shop_spectral_stream(
        &self,
        lane: &mut Self::LaneState,
        ante: u8,
    ) -> Self::ShopSpectralStream {
        self.open(lane, 0x3000 ^ ante as u64)
    }
    fn next_shop_spectral(&self, stream: &mut Self::ShopSpectralStream) -> Option<ShopItemOutcome> {
        stream.next_u64().map(|r| ShopItemOutcome {
            kind: ConsumableKind::Spectral,
            id: SPECTRALS[(r as usize) % SPECTRALS.len()].into(),
            edition: None,
        })
    }

    type ShopPlanetStream = DemoStream;
    fn open_shop_planet_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::ShopPlanetStream {
        self.open(lane, 0x4000 ^ ante as u64)
    }
    fn next_shop_planet(&self, stream: &mut Self::ShopPlanetStream) -> Option<ShopItemOutcome> {
        stream.next_u64().map(|r| ShopItemOutcome {
            kind: ConsumableKind::Planet,
            id: PLANETS[(r as usize) % PLANETS.len()].into(),
            edition: None,
        })
    }

    type PackStream = DemoStream;
    fn open_booster_pack_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::PackStream {
        self.open(lane, 0x5000 ^ ante as u64)
    }
    fn next_booster_pack(&self, stream: &mut Self::PackStream) -> Option<PackOutcome> {
        stream.next_u64().map(|r| {
            let kind = match r % 5 {
                0 => PackKind::Arcana,
                1 => PackKind::Celestial,
                2 => PackKind::Spectral,
                3 => PackKind::Standard,
                _ => PackKind::Buffoon,
            };
            let size = match (r >> 16) % 10 {
                0 => PackSize::Mega,
                1 | 2 => PackSize::Jumbo,
                _ => PackSize::Normal,
            };
            PackOutcome { kind, pack_index: (r >> 8) as u32 % 4, size }
        })
    }

    type ArcanaPackStream = DemoStream;
    fn open_arcana_pack_tarot_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::ArcanaPackStream {
        self.open(lane, 0x6000 ^ pack_index as u64)
    }
    fn next_arcana_pack_contents(&self, stream: &mut Self::ArcanaPackStream) -> Option<CardOutcome> {
        stream.next_u64().map(|r| CardOutcome { id: TAROTS[(r as usize) % TAROTS.len()].into() })
    }
    fn next_arcana_pack_has_soul(&self, stream: &mut Self::ArcanaPackStream) -> bool {
        stream.rng % 23 == 0
    }

    type CelestialPackStream = DemoStream;
    fn open_celestial_pack_planet_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::CelestialPackStream {
        self.open(lane, 0x7000 ^ pack_index as u64)
    }
    fn next_celestial_pack_contents(
        &self,
        stream: &mut Self::CelestialPackStream,
    ) -> Option<CardOutcome> {
        stream.next_u64().map(|r| CardOutcome { id: PLANETS[(r as usize) % PLANETS.len()].into() })
    }

    type SpectralPackStream = DemoStream;
    fn open_spectral_pack_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::SpectralPackStream {
        self.open(lane, 0x8000 ^ pack_index as u64)
    }
    fn next_spectral_pack_contents(
        &self,
        stream: &mut Self::SpectralPackStream,
    ) -> Option<CardOutcome> {
        stream.next_u64().map(|r| CardOutcome { id: SPECTRALS[(r as usize) % SPECTRALS.len()].into() })
    }
    fn next_spectral_pack_has_soul(&self, stream: &mut Self::SpectralPackStream) -> bool {
        stream.rng % 29 == 0
    }

    type StandardPackStream = DemoStream;
    fn open_standard_pack_card_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::StandardPackStream {
        self.open(lane, 0x9000 ^ pack_index as u64)
    }
    fn next_standard_pack_contents(
        &self,
        stream: &mut Self::StandardPackStream,
    ) -> Option<PlayingCardOutcome> {
        stream.next_u64().map(|r| PlayingCardOutcome {
            suit: SUITS[(r as usize) % SUITS.len()],
            rank: RANKS[(r as usize >> 4) % RANKS.len()],
            enhancement: if r % 7 == 0 { Some(Enhancement::Steel) } else { None },
            seal: if r % 11 == 0 { Some(Seal::Gold) } else { None },
            edition: if r % 13 == 0 { Some(Edition::Foil) } else { None },
        })
    }

    type BuffoonPackStream = DemoStream;
    fn open_buffoon_pack_joker_stream(
        &self,
        lane: &mut Self::LaneState,
        pack_index: u32,
    ) -> Self::BuffoonPackStream {
        self.open(lane, 0xA000 ^ pack_index as u64)
    }
    fn next_buffoon_pack_contents(&self, stream: &mut Self::BuffoonPackStream) -> Option<JokerOutcome> {
        stream.next_u64().map(|r| {
            let (id, rarity) = JOKERS[(r as usize) % JOKERS.len()];
            JokerOutcome { id: id.into(), rarity, edition: None, sticker: None }
        })
    }

    type TagStream = DemoStream;
    fn open_tag_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::TagStream {
        self.open(lane, 0xB000 ^ ante as u64)
    }
    fn next_tag(&self, stream: &mut Self::TagStream) -> Option<TagOutcome> {
        stream.next_u64().map(|r| TagOutcome { id: TAGS[(r as usize) % TAGS.len()].into() })
    }

    type SoulJokerStream = DemoStream;
    fn open_soul_joker_stream(&self, lane: &mut Self::LaneState, ante: u8) -> Self::SoulJokerStream {
        self.open(lane, 0xC000 ^ ante as u64)
    }
    fn next_soul_joker(&self, stream: &mut Self::SoulJokerStream) -> Option<JokerOutcome> {
        stream.next_u64().map(|r| {
            let (id, _) = JOKERS[(r as usize) % JOKERS.len()];
            JokerOutcome { id: id.into(), rarity: Rarity::Legendary, edition: None, sticker: None }
        })
    }

    fn ante_first_voucher(&self, lane: &mut Self::LaneState, ante: u8) -> VoucherOutcome {
        lane.draws += 1;
        let r = splitmix64(lane.base ^ 0xD000 ^ ante as u64 ^ lane.draws);
        VoucherOutcome { id: VOUCHERS[(r as usize) % VOUCHERS.len()].into() }
    }

    fn ante_boss(&self, lane: &mut Self::LaneState, ante: u8) -> Boss {
        lane.draws += 1;
        let r = splitmix64(lane.base ^ 0xE000 ^ ante as u64 ^ lane.draws);
        BOSSES[(r as usize) % BOSSES.len()]
    }

    fn apply_voucher_effect(&self, _lane: &mut Self::LaneState, _voucher: &VoucherOutcome) {
        // The demo backend has no ante-length/unlock model to mutate.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_same_seed_always_opens_to_the_same_lane_hash() {
        let seed = Seed::parse("AAAAAAA2").unwrap();
        assert_eq!(seed_hash(&seed), seed_hash(&seed));
    }

    #[test]
    fn different_seeds_produce_different_shop_contents_almost_always() {
        let source = DemoItemSource;
        let a = Seed::parse("AAAAAAA2").unwrap();
        let b = Seed::parse("AAAAAAA3").unwrap();
        let mut lane_a = source.open_lane(&a);
        let mut lane_b = source.open_lane(&b);
        let mut sa = source.open_shop_item_stream(&mut lane_a, 1);
        let mut sb = source.open_shop_item_stream(&mut lane_b, 1);
        assert_ne!(source.next_shop_item(&mut sa), source.next_shop_item(&mut sb));
    }
}
