//! Status vocabulary normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::verification::VerificationStatus;

static STATUS_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(passed|review[\s_-]*recommended|caution|high[\s_-]*risk)\b").unwrap()
});

/// Map free text onto the canonical status vocabulary.
///
/// The first recognizable status token wins; separators between words may
/// be spaces, underscores or hyphens, in any case. Anything else is
/// `review_recommended`, never `passed`.
pub fn normalize(raw: &str) -> VerificationStatus {
    let Some(token) = STATUS_TOKEN.find(raw) else {
        return VerificationStatus::ReviewRecommended;
    };

    let token = token.as_str().to_ascii_lowercase();
    if token == "passed" {
        VerificationStatus::Passed
    } else if token == "caution" {
        VerificationStatus::Caution
    } else if token.starts_with("high") {
        VerificationStatus::HighRisk
    } else {
        VerificationStatus::ReviewRecommended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_separator_and_case_variants() {
        assert_eq!(normalize("Review-Recommended"), VerificationStatus::ReviewRecommended);
        assert_eq!(normalize("review recommended"), VerificationStatus::ReviewRecommended);
        assert_eq!(normalize("HIGH_RISK"), VerificationStatus::HighRisk);
        assert_eq!(normalize("high-risk"), VerificationStatus::HighRisk);
        assert_eq!(normalize("High Risk"), VerificationStatus::HighRisk);
        assert_eq!(normalize("[Passed]"), VerificationStatus::Passed);
        assert_eq!(normalize("**caution**"), VerificationStatus::Caution);
    }

    #[test]
    fn test_unrecognized_fails_toward_review() {
        assert_eq!(normalize(""), VerificationStatus::ReviewRecommended);
        assert_eq!(normalize("looks fine"), VerificationStatus::ReviewRecommended);
        assert_eq!(normalize("pass"), VerificationStatus::ReviewRecommended);
        assert_eq!(normalize("bypassed"), VerificationStatus::ReviewRecommended);
    }

    #[test]
    fn test_canonical_tokens_round_trip() {
        for status in VerificationStatus::ALL {
            assert_eq!(normalize(status.as_str()), status);
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in ".{0,60}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(once.as_str()), once);
            prop_assert!(VerificationStatus::ALL.contains(&once));
        }
    }
}
