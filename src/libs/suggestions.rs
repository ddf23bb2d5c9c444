//! Improvement suggestions for the habit list.

use crate::libs::habit::Habit;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of suggestions shown at once.
pub const SUGGESTION_COUNT: usize = 3;

pub const FALLBACK_POOL: [&str; 5] = [
    "Focus on your highest-importance habits during peak energy hours (usually morning)",
    "Consider breaking down larger goals into smaller, more achievable daily targets",
    "Try habit stacking: link new habits to existing ones for better consistency",
    "Schedule weekly reviews to assess progress and adjust goals if needed",
    "Use the 2-minute rule: if a habit takes less than 2 minutes, do it immediately",
];

/// Produces up to [`SUGGESTION_COUNT`] short suggestions. Never fails.
#[allow(async_fn_in_trait)]
pub trait Suggest {
    async fn suggest(&mut self, habits: &[Habit]) -> Vec<String>;
}

/// Static suggestions drawn from [`FALLBACK_POOL`].
pub struct FallbackSuggester<R: Rng> {
    rng: R,
}

impl<R: Rng> FallbackSuggester<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Three distinct entries of the pool.
    pub fn pick(&mut self) -> Vec<String> {
        FALLBACK_POOL
            .choose_multiple(&mut self.rng, SUGGESTION_COUNT)
            .map(|s| s.to_string())
            .collect()
    }
}

impl<R: Rng> Suggest for FallbackSuggester<R> {
    async fn suggest(&mut self, _habits: &[Habit]) -> Vec<String> {
        self.pick()
    }
}
