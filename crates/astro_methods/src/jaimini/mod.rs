//! Jaimini astrology: chara karakas, karakamsha, arudha padas, rashi drishti,
//! chara dasha and yogas.

pub mod arudha;
pub mod chara_dasha;
pub mod drishti;
pub mod karakas;
pub mod methodology;
pub mod yogas;

pub use arudha::{calculate_arudha_padas, ArudhaPada, ArudhaPadas};
pub use chara_dasha::{calculate_chara_dasha, CharaDashaPeriod, CharaDashaTimeline, DashaDirection};
pub use drishti::{aspected_signs, sign_aspects, signs_in_aspect};
pub use karakas::{calculate_chara_karakas, calculate_karakamsha, CharaKarakas, KarakaRole};
pub use methodology::{JaiminiChart, JaiminiMethodology};
pub use yogas::{detect_all, JaiminiYoga, YogaStrength, YogaType};
