//! Hunger/satiety model.
//!
//! Hunger lives on a `[0, 100]` scale. Food is accounted in a "belly
//! fullness" coordinate `x` in `[0, 1]` where `hunger = 100 * (x - 1)^2`.
//! Eating adds food to `x`. Past `x = 1` the caveman has overeaten and
//! hunger climbs again; results are clamped to the hunger scale.

use crate::components::MAX_HUNGER;

const HUNGER_SCALE: f64 = 100.0;

/// Belly fullness to hunger.
pub fn satiety_to_hunger(x: f64) -> f64 {
    HUNGER_SCALE * (x - 1.0).powi(2)
}

/// Hunger to belly fullness. Inverse of [`satiety_to_hunger`] on `[0, 1]`.
pub fn hunger_to_satiety(hunger: f64) -> f64 {
    1.0 - (hunger.clamp(0.0, MAX_HUNGER) / HUNGER_SCALE).sqrt()
}

/// Hunger after eating `food` units, starting from `hunger`.
pub fn hunger_after_eating(hunger: f64, food: f64) -> f64 {
    let fullness = hunger_to_satiety(hunger) + food.max(0.0);
    satiety_to_hunger(fullness).clamp(0.0, MAX_HUNGER)
}

/// Food that would bring `hunger` to exactly zero.
pub fn food_needed_for_zero_hunger(hunger: f64) -> f64 {
    1.0 - hunger_to_satiety(hunger)
}

/// Relationship gain for relieving `hunger_before` with `food_shared`:
/// the hunger reduction the gift produced.
pub fn relationship_delta(hunger_before: f64, food_shared: f64) -> f64 {
    -(hunger_after_eating(hunger_before, food_shared) - hunger_before)
}
