//! Tolerant parsing of fact-check replies.
//!
//! Replies are scanned line by line into labeled sections
//! (`STATUS`, `CONFIDENCE`, `SUMMARY`, `CLAIMS`, `RECOMMENDATIONS`). A label
//! may carry markdown decoration (`**STATUS:**`, `## Claims:`) and may sit
//! anywhere in a line, so `SUMMARY: Fine. CONFIDENCE: 85` yields two
//! sections. A section runs until the next label or the end of the text.
//! Each field is then extracted from its own section, so a missing or
//! garbled field never blocks the others.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::verification::{Claim, ClaimStatus, VerificationMode, VerificationStatus};
use crate::verify::status::normalize;

/// Confidence reported when the reply carries none.
pub const DEFAULT_CONFIDENCE: u8 = 50;

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[#>*_]*(status|confidence|summary|claims|recommendations)(?:\s+(?:level|score))?[\s*_]*:[\s*_]*",
    )
    .unwrap()
});

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").unwrap());

static CLAIM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:[-*•]\s*)?\d+[.)]\s*["“](.+?)["”]\s*\|\s*([^|]+?)\s*\|\s*(.+?)\s*$"#)
        .unwrap()
});

// `*` needs a following space so `**bold**` lines are not bullets.
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-•]\s*|\*\s+)([^\s-].*?)\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Status,
    Confidence,
    Summary,
    Claims,
    Recommendations,
}

impl Label {
    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "status" => Some(Self::Status),
            "confidence" => Some(Self::Confidence),
            "summary" => Some(Self::Summary),
            "claims" => Some(Self::Claims),
            "recommendations" => Some(Self::Recommendations),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Section<'a> {
    label: Label,
    /// Text after the colon on the label line, then each following line.
    lines: Vec<&'a str>,
}

impl Section<'_> {
    fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A reply split into labeled sections.
#[derive(Debug)]
pub struct ReplySections<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> ReplySections<'a> {
    /// Split `raw` into sections. Text before the first label is ignored.
    pub fn scan(raw: &'a str) -> Self {
        let mut sections: Vec<Section<'a>> = Vec::new();

        for line in raw.lines() {
            let mut rest = 0;
            for caps in LABEL.captures_iter(line) {
                let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                // `substatus:` is not a label
                if line[..name.start()]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_alphanumeric)
                {
                    continue;
                }
                let Some(label) = Label::parse(name.as_str()) else {
                    continue;
                };

                append(&mut sections, &line[rest..whole.start()]);
                sections.push(Section {
                    label,
                    lines: Vec::new(),
                });
                rest = whole.end();
            }
            append(&mut sections, &line[rest..]);
        }

        Self { sections }
    }

    fn all(&self, label: Label) -> impl Iterator<Item = &Section<'a>> {
        self.sections.iter().filter(move |s| s.label == label)
    }

    fn first(&self, label: Label) -> Option<&Section<'a>> {
        self.all(label).next()
    }

    /// Status from the first STATUS section; `review_recommended` without one.
    pub fn status(&self) -> VerificationStatus {
        self.first(Label::Status)
            .map(|s| normalize(&s.text()))
            .unwrap_or_default()
    }

    /// First integer of the first CONFIDENCE section, clamped to 0–100.
    pub fn confidence(&self) -> u8 {
        self.first(Label::Confidence)
            .and_then(|s| INTEGER.find(&s.text()).map(|m| clamp_confidence(m.as_str())))
            .unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// Text of the first SUMMARY section that has any.
    pub fn summary(&self) -> Option<String> {
        self.all(Label::Summary)
            .map(|s| s.text().trim_matches(|c| c == '*' || c == '_').trim().to_string())
            .find(|s| !s.is_empty())
    }

    /// Well-formed claim lines of every CLAIMS section; the rest are skipped.
    pub fn claims(&self) -> Vec<Claim> {
        self.all(Label::Claims)
            .flat_map(|s| s.lines.iter())
            .filter_map(|line| parse_claim(line))
            .collect()
    }

    /// Bulleted lines of every RECOMMENDATIONS section, marker stripped.
    pub fn recommendations(&self) -> Vec<String> {
        self.all(Label::Recommendations)
            .flat_map(|s| s.lines.iter())
            .filter_map(|line| BULLET.captures(line))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

// Leftover decoration such as the `## ` before a label carries no text.
fn append<'a>(sections: &mut [Section<'a>], fragment: &'a str) {
    if fragment
        .chars()
        .all(|c| c.is_whitespace() || matches!(c, '#' | '>' | '*' | '_'))
    {
        return;
    }
    if let Some(current) = sections.last_mut() {
        current.lines.push(fragment);
    }
}

/// Parse one `<n>. "<claim>" | <status> | <explanation>` line.
pub fn parse_claim(line: &str) -> Option<Claim> {
    let caps = CLAIM_LINE.captures(line)?;
    let status = ClaimStatus::parse(caps.get(2)?.as_str())?;
    let text = caps.get(1)?.as_str().trim();
    if text.is_empty() {
        return None;
    }

    Some(Claim {
        text: text.to_string(),
        status,
        explanation: caps.get(3)?.as_str().trim().to_string(),
    })
}

/// Clamp an integer literal into 0–100. Literals too large for `i64`
/// saturate in their sign's direction.
pub fn clamp_confidence(literal: &str) -> u8 {
    let value = literal.parse::<i64>().unwrap_or(if literal.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    });
    value.clamp(0, 100) as u8
}

/// Fields extracted from one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub status: VerificationStatus,
    pub confidence: u8,
    pub summary: String,
    pub claims: Vec<Claim>,
    pub recommendations: Vec<String>,
}

/// Parse a raw reply for `mode`, synthesizing a summary when none is found.
///
/// Claims and recommendations are only read in detailed mode.
pub fn parse_reply(raw: &str, mode: VerificationMode) -> ParsedReply {
    let sections = ReplySections::scan(raw);

    let status = sections.status();
    let confidence = sections.confidence();

    let (claims, recommendations) = match mode {
        VerificationMode::Quick => (Vec::new(), Vec::new()),
        VerificationMode::Detailed => (sections.claims(), sections.recommendations()),
    };

    let summary = sections.summary().unwrap_or_else(|| match mode {
        VerificationMode::Quick => format!(
            "Quick fact-check completed with status: {}. Confidence: {}%.",
            status, confidence
        ),
        VerificationMode::Detailed if !claims.is_empty() => claims_summary(&claims, status),
        VerificationMode::Detailed => format!(
            "Detailed fact-check completed with status: {}. Confidence: {}%.",
            status, confidence
        ),
    });

    ParsedReply {
        status,
        confidence,
        summary,
        claims,
        recommendations,
    }
}

fn claims_summary(claims: &[Claim], status: VerificationStatus) -> String {
    let count = |wanted: ClaimStatus| claims.iter().filter(|c| c.status == wanted).count();
    format!(
        "Analysis of {} claims: {} verified, {} unverified, {} disputed. Status: {}.",
        claims.len(),
        count(ClaimStatus::Verified),
        count(ClaimStatus::Unverified),
        count(ClaimStatus::Disputed),
        status
    )
}
