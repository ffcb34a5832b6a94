//! Running discount multiplier and discounted return of one rollout.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountAccumulator {
    gamma: f64,
    total: f64,
}

impl Default for DiscountAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountAccumulator {
    pub fn new() -> Self {
        Self {
            gamma: 1.0,
            total: 0.0,
        }
    }

    /// Add `gamma * reward` to the return and hand it back.
    #[inline]
    pub fn accumulate(&mut self, reward: f64) -> f64 {
        let earned = self.gamma * reward;
        self.total += earned;
        earned
    }

    /// Compound the multiplier by one more step of `discount`.
    #[inline]
    pub fn advance(&mut self, discount: f64) {
        self.gamma *= discount;
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}
