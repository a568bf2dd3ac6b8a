//! Approach-based judgement thresholds.
//!
//! Objects are judged by how far their approach ring has closed when clicked, not by a
//! millisecond offset. The approach amount runs from 1.0 at spawn down to 0.5 at preempt.

use crate::models::stats::Judgement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    /// Minimum approach amount for a 300.
    pub great_approach: f32,
    /// Minimum approach amount for a 100. Anything lower is a 50.
    pub good_approach: f32,
}

impl HitWindow {
    pub fn new() -> Self {
        Self {
            great_approach: 0.8,
            good_approach: 0.5,
        }
    }

    pub fn from_custom(great_approach: f32, good_approach: f32) -> Self {
        Self {
            great_approach,
            good_approach,
        }
    }

    pub fn judge(&self, approach_amount: f32) -> Judgement {
        if approach_amount >= self.great_approach {
            Judgement::Hit300
        } else if approach_amount >= self.good_approach {
            Judgement::Hit100
        } else {
            Judgement::Hit50
        }
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        let window = HitWindow::new();
        assert_eq!(window.judge(1.0), Judgement::Hit300);
        assert_eq!(window.judge(0.8), Judgement::Hit300);
        assert_eq!(window.judge(0.79), Judgement::Hit100);
        assert_eq!(window.judge(0.5), Judgement::Hit100);
        assert_eq!(window.judge(0.49), Judgement::Hit50);
    }

    #[test]
    fn test_custom_thresholds() {
        let window = HitWindow::from_custom(0.9, 0.6);
        assert_eq!(window.judge(0.85), Judgement::Hit100);
        assert_eq!(window.judge(0.55), Judgement::Hit50);
    }
}
