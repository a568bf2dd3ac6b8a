//! Judgement tiers and the per-session score accumulator.

/// Judgement tiers from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Judgement {
    Hit300,
    Hit100,
    Hit50,
    /// Visibility window closed without a hit.
    Miss,
}

impl Judgement {
    /// Numeric tier (300, 100, 50 or 0).
    pub fn tier(self) -> u32 {
        match self {
            Judgement::Hit300 => 300,
            Judgement::Hit100 => 100,
            Judgement::Hit50 => 50,
            Judgement::Miss => 0,
        }
    }

    pub fn is_miss(self) -> bool {
        matches!(self, Judgement::Miss)
    }
}

/// Running totals for one play session.
///
/// Only the session's accumulation stage writes to it; everything else reads copies.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreAccumulator {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub hit300: u32,
    pub hit100: u32,
    pub hit50: u32,
    pub hit_miss: u32,
    /// Sum of tiers without the combo multiplier.
    pub score_raw: u64,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one judgement into the totals.
    pub fn apply(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Hit300 => self.hit300 += 1,
            Judgement::Hit100 => self.hit100 += 1,
            Judgement::Hit50 => self.hit50 += 1,
            Judgement::Miss => self.hit_miss += 1,
        }

        self.combo = if judgement.is_miss() { 0 } else { self.combo + 1 };

        let tier = judgement.tier() as u64;
        self.score_raw += tier;
        self.score += tier * self.combo.max(1) as u64;
        self.max_combo = self.max_combo.max(self.combo);
    }

    pub fn judged(&self) -> u32 {
        self.hit300 + self.hit100 + self.hit50 + self.hit_miss
    }

    /// Accuracy percentage (0-100), weighting 300/100/50 as 6/2/1 sixths.
    pub fn accuracy(&self) -> f64 {
        let total = self.judged() as f64;
        if total == 0.0 {
            return 0.0;
        }

        let points = self.hit300 as f64 * 6.0 + self.hit100 as f64 * 2.0 + self.hit50 as f64;
        (points / (total * 6.0)) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_sequence() {
        let mut acc = ScoreAccumulator::new();
        let mut combos = Vec::new();
        for j in [
            Judgement::Hit300,
            Judgement::Hit300,
            Judgement::Miss,
            Judgement::Hit100,
        ] {
            acc.apply(j);
            combos.push(acc.combo);
        }

        assert_eq!(combos, vec![1, 2, 0, 1]);
        assert_eq!(acc.score, 1000);
        assert_eq!(acc.score_raw, 700);
        assert_eq!(acc.max_combo, 2);
        assert_eq!(acc.hit300, 2);
        assert_eq!(acc.hit100, 1);
        assert_eq!(acc.hit_miss, 1);
        assert_eq!(acc.judged(), 4);
    }

    #[test]
    fn test_accuracy() {
        let mut acc = ScoreAccumulator::new();
        assert_eq!(acc.accuracy(), 0.0);

        acc.apply(Judgement::Hit300);
        assert!((acc.accuracy() - 100.0).abs() < 1e-9);

        acc.apply(Judgement::Miss);
        assert!((acc.accuracy() - 50.0).abs() < 1e-9);
    }
}
