//! Star rating: stars are lost at fixed move counts.

use derive_getters::Getters;
use tracing::instrument;

/// Star thresholds for one session.
///
/// Move counts only increase, so each threshold can cost at most one star.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StarPolicy {
    thresholds: Vec<u32>,
    max_stars: u8,
}

impl StarPolicy {
    /// Creates a policy. Thresholds are matched exactly, in any order.
    pub fn new(thresholds: Vec<u32>, max_stars: u8) -> Self {
        Self {
            thresholds,
            max_stars,
        }
    }

    /// Returns true if reaching `move_count` costs a star.
    #[instrument(skip(self))]
    pub fn loses_star_at(&self, move_count: u32, stars: u8) -> bool {
        stars > 0 && self.thresholds.contains(&move_count)
    }
}

impl Default for StarPolicy {
    fn default() -> Self {
        Self::new(vec![13, 25], 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let policy = StarPolicy::default();
        assert!(!policy.loses_star_at(12, 3));
        assert!(policy.loses_star_at(13, 3));
        assert!(!policy.loses_star_at(14, 2));
        assert!(policy.loses_star_at(25, 2));
        assert!(!policy.loses_star_at(37, 1));
    }

    #[test]
    fn test_no_star_lost_below_zero() {
        let policy = StarPolicy::new(vec![1, 2, 3, 4], 3);
        assert!(!policy.loses_star_at(4, 0));
        assert!(policy.loses_star_at(4, 1));
    }
}
