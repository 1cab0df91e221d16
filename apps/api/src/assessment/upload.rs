use serde::{Deserialize, Serialize};

use crate::assessment::policy::AssessmentPolicy;

/// Coarse quality indicator shown next to an input before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Unknown,
    Good,
    Limited,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    Image,
    Cv,
}

/// Size-based tier for an uploaded file. Small images are usually
/// thumbnails or crops; small CV files rarely hold a full résumé.
pub fn upload_tier(kind: UploadKind, size_bytes: Option<u64>, policy: &AssessmentPolicy) -> QualityTier {
    let Some(size) = size_bytes else {
        return QualityTier::Unknown;
    };

    let (poor_below, limited_below) = match kind {
        UploadKind::Image => (policy.image_poor_bytes, policy.image_limited_bytes),
        UploadKind::Cv => (policy.cv_poor_bytes, policy.cv_limited_bytes),
    };

    if size < poor_below {
        QualityTier::Poor
    } else if size < limited_below {
        QualityTier::Limited
    } else {
        QualityTier::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_upload_is_unknown() {
        let policy = AssessmentPolicy::default();
        assert_eq!(upload_tier(UploadKind::Cv, None, &policy), QualityTier::Unknown);
    }

    #[test]
    fn test_image_tiers() {
        let policy = AssessmentPolicy::default();
        assert_eq!(upload_tier(UploadKind::Image, Some(10 * 1024), &policy), QualityTier::Poor);
        assert_eq!(upload_tier(UploadKind::Image, Some(50 * 1024), &policy), QualityTier::Limited);
        assert_eq!(upload_tier(UploadKind::Image, Some(100 * 1024), &policy), QualityTier::Good);
    }

    #[test]
    fn test_cv_tiers() {
        let policy = AssessmentPolicy::default();
        assert_eq!(upload_tier(UploadKind::Cv, Some(9_000), &policy), QualityTier::Poor);
        assert_eq!(upload_tier(UploadKind::Cv, Some(20 * 1024), &policy), QualityTier::Limited);
        assert_eq!(upload_tier(UploadKind::Cv, Some(200 * 1024), &policy), QualityTier::Good);
    }
}
