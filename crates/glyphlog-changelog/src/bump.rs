//! Recommended version bump

use glyphlog_core::ReleaseType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{CommitRecord, CommitType};

/// Outcome of a bump recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpRecommendation {
    /// Recommended release type
    pub release_type: ReleaseType,
    /// Human-readable reason
    pub reason: String,
    /// Number of breaking-change notes seen
    pub breakings: usize,
    /// Number of feature commits seen
    pub features: usize,
}

/// Bump rules handed to the versioning host.
///
/// Works on parsed records whose `type` is still the raw token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendedBump;

impl RecommendedBump {
    /// Breaking notes mean major, features minor, anything else patch
    pub fn what_bump(&self, commits: &[CommitRecord]) -> BumpRecommendation {
        let mut release_type = ReleaseType::Patch;
        let mut breakings = 0;
        let mut features = 0;

        for commit in commits {
            if commit.is_breaking() {
                breakings += commit.notes.len();
                release_type = ReleaseType::Major;
            } else if commit.commit_type.as_deref().and_then(CommitType::from_token)
                == Some(CommitType::Feat)
            {
                features += 1;
                if release_type.level() > ReleaseType::Minor.level() {
                    release_type = ReleaseType::Minor;
                }
            }
        }

        let reason = if breakings == 1 {
            format!("There is {} BREAKING CHANGE and {} features", breakings, features)
        } else {
            format!("There are {} BREAKING CHANGES and {} features", breakings, features)
        };
        debug!(%release_type, breakings, features, "bump recommended");

        BumpRecommendation {
            release_type,
            reason,
            breakings,
            features,
        }
    }
}
