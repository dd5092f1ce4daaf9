//! Small closed-domain enums shared by clauses and by the item-generation
//! model's outcome types. Parsing is case-insensitive, single table lookup,
//! mirroring the token-normalization style the rest of the core model uses.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::CoreError;

macro_rules! case_insensitive_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($text) { return Ok(Self::$variant); })+
                Err(CoreError::InvalidEnumValue { field: stringify!($name), value: s.to_string() })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

case_insensitive_enum! {
    /// Top-level clause category, matched against the `type` field of a query clause.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum ItemCategory {
        Joker => "joker",
        SoulJoker => "souljoker",
        Tarot => "tarot",
        Planet => "planet",
        Spectral => "spectral",
        PlayingCard => "playingcard",
        Voucher => "voucher",
        Tag => "tag",
        Boss => "boss",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Edition {
        Base => "base",
        Foil => "foil",
        Holographic => "holographic",
        Polychrome => "polychrome",
        Negative => "negative",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Sticker {
        Eternal => "eternal",
        Perishable => "perishable",
        Rental => "rental",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Suit {
        Spades => "spades",
        Hearts => "hearts",
        Clubs => "clubs",
        Diamonds => "diamonds",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Rank {
        Two => "2",
        Three => "3",
        Four => "4",
        Five => "5",
        Six => "6",
        Seven => "7",
        Eight => "8",
        Nine => "9",
        Ten => "10",
        Jack => "jack",
        Queen => "queen",
        King => "king",
        Ace => "ace",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Seal {
        Gold => "gold",
        Red => "red",
        Blue => "blue",
        Purple => "purple",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Enhancement {
        Bonus => "bonus",
        Mult => "mult",
        Wild => "wild",
        Glass => "glass",
        Steel => "steel",
        Stone => "stone",
        Gold => "gold",
        Lucky => "lucky",
    }
}

case_insensitive_enum! {
    /// A joker's rarity tier, used to match the `any_common`/`any_uncommon`/
    /// `any_rare`/`any_legendary` wildcard values. The generation model
    /// tags each `JokerOutcome` with the rarity of the id it produced;
    /// this crate has no joker catalog of its own to look it up from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Rarity {
        Common => "common",
        Uncommon => "uncommon",
        Rare => "rare",
        Legendary => "legendary",
    }
}

case_insensitive_enum! {
    /// Which shop tag slot(s) a tag clause may match against.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum TagSlot {
        Small => "small",
        Big => "big",
        Either => "either",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Deck {
        Red => "red",
        Blue => "blue",
        Yellow => "yellow",
        Green => "green",
        Black => "black",
        Magic => "magic",
        Nebula => "nebula",
        Ghost => "ghost",
        Abandoned => "abandoned",
        Checkered => "checkered",
        Zodiac => "zodiac",
        Painted => "painted",
        Anaglyph => "anaglyph",
        Plasma => "plasma",
        Erratic => "erratic",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Stake {
        White => "white",
        Red => "red",
        Green => "green",
        Black => "black",
        Blue => "blue",
        Purple => "purple",
        Orange => "orange",
        Gold => "gold",
    }
}

case_insensitive_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum Boss {
        TheHook => "the_hook",
        TheOx => "the_ox",
        TheHouse => "the_house",
        TheWall => "the_wall",
        TheWheel => "the_wheel",
        TheArm => "the_arm",
        TheClub => "the_club",
        TheFish => "the_fish",
        ThePsychic => "the_psychic",
        TheGoad => "the_goad",
        TheWater => "the_water",
        TheWindow => "the_window",
        TheManacle => "the_manacle",
        TheEye => "the_eye",
        TheMouth => "the_mouth",
        ThePlant => "the_plant",
        TheSerpent => "the_serpent",
        ThePillar => "the_pillar",
        TheNeedle => "the_needle",
        TheHead => "the_head",
        TheTooth => "the_tooth",
        TheFlint => "the_flint",
        TheMark => "the_mark",
        AmberAcorn => "amber_acorn",
        CeruleanBell => "cerulean_bell",
        CrimsonHeart => "crimson_heart",
        VerdantLeaf => "verdant_leaf",
        VioletVessel => "violet_vessel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("FOIL".parse::<Edition>().unwrap(), Edition::Foil);
        assert_eq!("Holographic".parse::<Edition>().unwrap(), Edition::Holographic);
    }

    #[test]
    fn unknown_value_is_invalid_enum_value() {
        let err = "shiny".parse::<Edition>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidEnumValue { .. }));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for s in [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds] {
            assert_eq!(s.to_string().parse::<Suit>().unwrap(), s);
        }
    }
}
