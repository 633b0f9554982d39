use serde::Serialize;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub session_score: usize,
    pub session_attempted: usize,
    pub lifetime_unique_answered: usize,
    pub bank_size: usize,
}

impl SessionProgress {
    /// Share of the bank answered at least once, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lifetime_fraction(&self) -> f32 {
        if self.bank_size == 0 {
            return 0.0;
        }
        self.lifetime_unique_answered as f32 / self.bank_size as f32
    }
}
