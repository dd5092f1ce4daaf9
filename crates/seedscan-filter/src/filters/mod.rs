//! One evaluator module per clause category (C3 of the filter pipeline).

mod common;

pub mod boss;
pub mod joker;
pub mod planet;
pub mod playing_card;
pub mod soul_joker;
pub mod spectral;
pub mod tag;
pub mod tarot;
pub mod voucher;

pub use boss::BossEvaluator;
pub use joker::JokerEvaluator;
pub use planet::PlanetEvaluator;
pub use playing_card::PlayingCardEvaluator;
pub use soul_joker::SoulJokerEvaluator;
pub use spectral::SpectralEvaluator;
pub use tag::TagEvaluator;
pub use tarot::TarotEvaluator;
pub use voucher::VoucherEvaluator;
