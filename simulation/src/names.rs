//! Name Generation for Cavemen
//!
//! Names are purely cosmetic; the engine only knows identities.

use rand::Rng;

use crate::components::CavemanId;

const SYLLABLES_START: &[&str] = &[
    "Ug", "Grok", "Thag", "Oog", "Zug", "Kra", "Mog", "Bru", "Dak", "Gor",
    "Hrum", "Ik", "Nar", "Rok", "Sha", "Tor", "Urk", "Vog", "Yar", "Ekk",
];

const SYLLABLES_END: &[&str] = &[
    "", "a", "ag", "bo", "da", "ga", "gh", "ka", "la", "mo",
    "na", "ok", "ra", "ruk", "sa", "ta", "u", "ug", "za", "zz",
];

/// Maps an identity to a display name. Names need not be unique.
pub trait NameSource {
    fn name_for(&mut self, id: CavemanId) -> String;
}

/// Draws a random two-syllable name for every identity it is asked about.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNames;

impl NameSource for RandomNames {
    fn name_for(&mut self, _id: CavemanId) -> String {
        random_name(&mut rand::thread_rng())
    }
}

/// Generate a random caveman name
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let start = SYLLABLES_START[rng.gen_range(0..SYLLABLES_START.len())];
    let end = SYLLABLES_END[rng.gen_range(0..SYLLABLES_END.len())];
    format!("{start}{end}")
}
