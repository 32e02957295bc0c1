//! Session result aggregation

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::types::{round1, Challenge, ReportEntry, SessionReport};
use crate::SCORE_TIER_HIGH;

pub const HEADLINE_SUCCESS: &str = "Amazing! You matched every pose!";
pub const HEADLINE_RETRY: &str = "Nice effort! Try again to beat your score!";

/// Builds the end-of-session report from the challenge sequence
#[derive(Debug, Default, Clone)]
pub struct ResultAggregator;

impl ResultAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Mean score, headline and per-challenge entries
    ///
    /// A challenge that never finalized counts as 0.
    pub fn aggregate(&self, challenges: &[Challenge]) -> SessionReport {
        let entries: Vec<ReportEntry> = challenges
            .iter()
            .map(|c| ReportEntry {
                name: c.name.clone(),
                score: c.score.unwrap_or(0.0),
            })
            .collect();

        let mean = if entries.is_empty() {
            0.0
        } else {
            entries.iter().map(|e| e.score).sum::<f64>() / entries.len() as f64
        };

        // Tier on the exact mean; only the reported value is rounded
        let success = mean > SCORE_TIER_HIGH;
        let headline = if success { HEADLINE_SUCCESS } else { HEADLINE_RETRY };

        SessionReport {
            digest: digest(&entries),
            entries,
            mean: round1(mean),
            success,
            headline: headline.to_string(),
            completed_at: Utc::now(),
        }
    }
}

/// SHA-256 hex over `name=score` lines
fn digest(entries: &[ReportEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        hasher.update(format!("{}={:.1}\n", entry.name, entry.score).as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TargetType;

    fn scored(name: &str, score: f64) -> Challenge {
        let mut c = Challenge::new(name, TargetType::Arm, vec![], "");
        c.score = Some(score);
        c
    }

    #[test]
    fn test_mean_and_retry_headline() {
        let report = ResultAggregator::new().aggregate(&[
            scored("A", 100.0),
            scored("B", 80.0),
            scored("C", 60.0),
        ]);
        assert_eq!(report.mean, 80.0);
        assert!(!report.success);
        assert_eq!(report.headline, HEADLINE_RETRY);
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[1], ReportEntry { name: "B".into(), score: 80.0 });
    }

    #[test]
    fn test_success_headline() {
        let report = ResultAggregator::new().aggregate(&[scored("A", 95.0), scored("B", 92.0)]);
        assert_eq!(report.mean, 93.5);
        assert!(report.success);
        assert_eq!(report.headline, HEADLINE_SUCCESS);
    }

    #[test]
    fn test_exactly_ninety_is_not_success() {
        let report = ResultAggregator::new().aggregate(&[scored("A", 90.0)]);
        assert!(!report.success);
    }

    #[test]
    fn test_success_uses_unrounded_mean() {
        let report = ResultAggregator::new().aggregate(&[
            scored("A", 90.1),
            scored("B", 90.0),
            scored("C", 90.0),
        ]);
        assert_eq!(report.mean, 90.0);
        assert!(report.success);
        assert_eq!(report.headline, HEADLINE_SUCCESS);
    }

    #[test]
    fn test_unscored_counts_as_zero() {
        let unscored = Challenge::new("X", TargetType::Arm, vec![], "");
        let report = ResultAggregator::new().aggregate(&[scored("A", 50.0), unscored]);
        assert_eq!(report.mean, 25.0);
    }

    #[test]
    fn test_digest_is_stable_and_score_sensitive() {
        let agg = ResultAggregator::new();
        let a = agg.aggregate(&[scored("A", 50.0)]);
        let b = agg.aggregate(&[scored("A", 50.0)]);
        let c = agg.aggregate(&[scored("A", 50.1)]);
        assert_eq!(a.digest.len(), 64);
        assert_eq!(a.digest, b.digest);
        assert_ne!(a.digest, c.digest);
    }
}
