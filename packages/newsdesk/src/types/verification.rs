//! Verification request and result types.
//!
//! Results come in two shapes sharing a common header: quick (status,
//! summary, confidence) and detailed (header plus claim-by-claim analysis
//! and editor recommendations). The `mode` tag selects the shape on the wire.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Depth of a verification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Three-field assessment.
    #[default]
    Quick,

    /// Claim-by-claim assessment with recommendations.
    Detailed,
}

impl VerificationMode {
    /// Parse a caller-supplied label. Anything but `detailed` is quick.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("detailed") {
            Self::Detailed
        } else {
            Self::Quick
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Detailed => "detailed",
        }
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical verification outcome.
///
/// Anything the parser cannot recognize lands on `ReviewRecommended`,
/// so malformed replies always route to a human.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Passed,
    #[default]
    ReviewRecommended,
    Caution,
    HighRisk,
}

impl VerificationStatus {
    /// All canonical statuses, mildest first.
    pub const ALL: [VerificationStatus; 4] = [
        Self::Passed,
        Self::ReviewRecommended,
        Self::Caution,
        Self::HighRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::ReviewRecommended => "review_recommended",
            Self::Caution => "caution",
            Self::HighRisk => "high_risk",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assessment of a single claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Verified,
    Unverified,
    Disputed,
    Opinion,
}

impl ClaimStatus {
    /// Parse a status token case-insensitively, ignoring surrounding
    /// brackets and emphasis markers.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token
            .trim()
            .trim_matches(|c: char| matches!(c, '[' | ']' | '*' | '_' | '`'))
            .to_ascii_lowercase();
        match token.as_str() {
            "verified" => Some(Self::Verified),
            "unverified" => Some(Self::Unverified),
            "disputed" => Some(Self::Disputed),
            "opinion" => Some(Self::Opinion),
            _ => None,
        }
    }
}

/// One factual assertion extracted from a detailed reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim text as quoted by the model.
    pub text: String,
    pub status: ClaimStatus,
    pub explanation: String,
}

/// Optional source metadata the article was written from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMaterial {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
}

impl SourceMaterial {
    /// True when neither a title nor a summary is present.
    ///
    /// A bare URL is not enough material to assess against.
    pub fn is_empty(&self) -> bool {
        is_blank(self.title.as_deref()) && is_blank(self.summary.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// A request to verify one article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationRequest {
    pub mode: VerificationMode,
    pub title: String,
    pub content: String,
    pub source: Option<SourceMaterial>,
    /// Ask the research service for live context first.
    pub use_research: bool,
    /// Store key to write the result back to.
    pub record_id: Option<String>,
}

impl VerificationRequest {
    pub fn new(mode: VerificationMode, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            mode,
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: SourceMaterial) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_research(mut self, use_research: bool) -> Self {
        self.use_research = use_research;
        self
    }

    pub fn for_record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }
}

/// Fields shared by both result shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationHeader {
    pub status: VerificationStatus,
    pub summary: String,
    /// 0–100.
    pub confidence: u8,
    pub checked_at: DateTime<Utc>,
    /// Present only when research was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_research: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<String>>,
    /// Estimated provider cost in USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// A computed verification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum VerificationResult {
    Quick {
        #[serde(flatten)]
        header: VerificationHeader,
    },
    Detailed {
        #[serde(flatten)]
        header: VerificationHeader,
        claims: Vec<Claim>,
        recommendations: Vec<String>,
    },
}

impl VerificationResult {
    pub fn header(&self) -> &VerificationHeader {
        match self {
            Self::Quick { header } | Self::Detailed { header, .. } => header,
        }
    }

    pub fn header_mut(&mut self) -> &mut VerificationHeader {
        match self {
            Self::Quick { header } | Self::Detailed { header, .. } => header,
        }
    }

    pub fn mode(&self) -> VerificationMode {
        match self {
            Self::Quick { .. } => VerificationMode::Quick,
            Self::Detailed { .. } => VerificationMode::Detailed,
        }
    }

    pub fn status(&self) -> VerificationStatus {
        self.header().status
    }

    pub fn summary(&self) -> &str {
        &self.header().summary
    }

    pub fn confidence(&self) -> u8 {
        self.header().confidence
    }

    /// Claims, empty for quick results.
    pub fn claims(&self) -> &[Claim] {
        match self {
            Self::Quick { .. } => &[],
            Self::Detailed { claims, .. } => claims,
        }
    }

    /// Recommendations, empty for quick results.
    pub fn recommendations(&self) -> &[String] {
        match self {
            Self::Quick { .. } => &[],
            Self::Detailed {
                recommendations, ..
            } => recommendations,
        }
    }
}

/// The subset of a result written back to the article record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSnapshot {
    pub status: VerificationStatus,
    pub summary: String,
    pub confidence: u8,
    pub checked_at: DateTime<Utc>,
    pub mode: VerificationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<Claim>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl From<&VerificationResult> for VerificationSnapshot {
    fn from(result: &VerificationResult) -> Self {
        let header = result.header();
        let (claims, recommendations) = match result {
            VerificationResult::Quick { .. } => (None, None),
            VerificationResult::Detailed {
                claims,
                recommendations,
                ..
            } => (Some(claims.clone()), Some(recommendations.clone())),
        };

        Self {
            status: header.status,
            summary: header.summary.clone(),
            confidence: header.confidence,
            checked_at: header.checked_at,
            mode: result.mode(),
            claims,
            recommendations,
        }
    }
}
