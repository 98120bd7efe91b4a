//! Mode-specific fact-check instructions.

use crate::types::research::ResearchFindings;
use crate::types::verification::{SourceMaterial, VerificationMode};

/// Marker used when no source material accompanies the article.
pub const NO_SOURCE_MARKER: &str =
    "No source material provided - assess based on internal consistency and common knowledge.";

const NOT_PROVIDED: &str = "Not provided";

/// Everything a prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub source: Option<&'a SourceMaterial>,
    pub research: Option<&'a ResearchFindings>,
}

/// Build the instruction for `mode`.
pub fn build_prompt(mode: VerificationMode, input: PromptInput<'_>) -> String {
    match mode {
        VerificationMode::Quick => quick_prompt(input),
        VerificationMode::Detailed => detailed_prompt(input),
    }
}

fn quick_prompt(input: PromptInput<'_>) -> String {
    format!(
        "You are a fact-checker for a local news organization. Quickly assess this article for factual accuracy.

{context}

ARTICLE TO CHECK:
Title: {title}
Content: {content}

Evaluate whether the article:
1. Accurately represents information (from source if provided, or is internally consistent)
2. Doesn't make claims that seem fabricated or exaggerated
3. Uses appropriate hedging for uncertain information
4. Avoids sensationalism

Respond in this EXACT format (no extra text):
STATUS: [passed/review_recommended/caution/high_risk]
SUMMARY: [2-3 sentences explaining your assessment]
CONFIDENCE: [0-100]",
        context = context_block(&input),
        title = input.title,
        content = input.content,
    )
}

fn detailed_prompt(input: PromptInput<'_>) -> String {
    format!(
        "You are a thorough fact-checker for a local news organization. Analyze this article claim by claim.

{context}

ARTICLE TO CHECK:
Title: {title}
Content: {content}

Instructions:
1. Extract each significant factual claim from the article
2. For each claim, determine if it is:
   - VERIFIED: Supported by source or widely known facts
   - UNVERIFIED: Cannot be confirmed from available information
   - DISPUTED: Contradicts source or known facts
   - OPINION: Editorial opinion, not a factual claim
3. Provide specific explanations for each claim
4. Give actionable recommendations for the editor

Respond in this EXACT format:
STATUS: [passed/review_recommended/caution/high_risk]
CONFIDENCE: [0-100]

CLAIMS:
1. \"[exact claim from article]\" | [verified/unverified/disputed/opinion] | [brief explanation]
2. \"[exact claim from article]\" | [verified/unverified/disputed/opinion] | [brief explanation]
(continue for all significant claims)

RECOMMENDATIONS:
- [actionable recommendation 1]
- [actionable recommendation 2]
(add more if needed)

SUMMARY: [2-3 sentence overall assessment]",
        context = context_block(&input),
        title = input.title,
        content = input.content,
    )
}

fn context_block(input: &PromptInput<'_>) -> String {
    let mut block = source_block(input.source);
    if let Some(research) = input.research.filter(|r| r.has_narrative()) {
        block.push_str("\n\n");
        block.push_str(&research_block(research));
    }
    block
}

fn source_block(source: Option<&SourceMaterial>) -> String {
    match source.filter(|s| !s.is_empty()) {
        Some(source) => format!(
            "SOURCE MATERIAL:\nTitle: {}\nSummary: {}\nURL: {}",
            or_not_provided(source.title.as_deref()),
            or_not_provided(source.summary.as_deref()),
            or_not_provided(source.url.as_deref()),
        ),
        None => NO_SOURCE_MARKER.to_string(),
    }
}

fn research_block(research: &ResearchFindings) -> String {
    let mut block = format!(
        "LIVE WEB RESEARCH (current information from web search; weigh it alongside the source):\n{}",
        research.narrative.trim()
    );
    if !research.citations.is_empty() {
        block.push_str("\n\nResearch citations:");
        for (i, url) in research.citations.iter().enumerate() {
            block.push_str(&format!("\n[{}] {}", i + 1, url));
        }
    }
    block
}

fn or_not_provided(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_PROVIDED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(source: Option<&'a SourceMaterial>, research: Option<&'a ResearchFindings>) -> PromptInput<'a> {
        PromptInput {
            title: "Library expands hours",
            content: "The library will open at 8am starting Monday.",
            source,
            research,
        }
    }

    #[test]
    fn test_missing_source_uses_marker() {
        let prompt = build_prompt(VerificationMode::Quick, input(None, None));
        assert!(prompt.contains(NO_SOURCE_MARKER));
        assert!(prompt.contains("Title: Library expands hours"));
        assert!(prompt.contains("CONFIDENCE: [0-100]"));
        assert!(!prompt.contains("CLAIMS:"));
    }

    #[test]
    fn test_url_only_source_counts_as_missing() {
        let source = SourceMaterial {
            url: Some("https://library.example".into()),
            ..Default::default()
        };
        let prompt = build_prompt(VerificationMode::Quick, input(Some(&source), None));
        assert!(prompt.contains(NO_SOURCE_MARKER));
    }

    #[test]
    fn test_partial_source_fills_not_provided() {
        let source = SourceMaterial {
            title: Some("Library board minutes".into()),
            ..Default::default()
        };
        let prompt = build_prompt(VerificationMode::Detailed, input(Some(&source), None));
        assert!(prompt.contains("SOURCE MATERIAL:\nTitle: Library board minutes\nSummary: Not provided\nURL: Not provided"));
        assert!(!prompt.contains(NO_SOURCE_MARKER));
    }

    #[test]
    fn test_detailed_prompt_describes_claim_format() {
        let prompt = build_prompt(VerificationMode::Detailed, input(None, None));
        assert!(prompt.contains("CLAIMS:"));
        assert!(prompt.contains("1. \"[exact claim from article]\" | [verified/unverified/disputed/opinion] | [brief explanation]"));
        assert!(prompt.contains("RECOMMENDATIONS:"));
        assert!(prompt.trim_end().ends_with("SUMMARY: [2-3 sentence overall assessment]"));
    }

    #[test]
    fn test_research_narrative_embedded_with_citations() {
        let research = ResearchFindings::new("Hours change confirmed by the county.")
            .with_citations(["https://county.example/library"]);
        let prompt = build_prompt(VerificationMode::Quick, input(None, Some(&research)));

        assert!(prompt.contains("LIVE WEB RESEARCH"));
        assert!(prompt.contains("Hours change confirmed by the county."));
        assert!(prompt.contains("[1] https://county.example/library"));
    }

    #[test]
    fn test_blank_research_not_embedded() {
        let research = ResearchFindings::new("  ");
        let prompt = build_prompt(VerificationMode::Quick, input(None, Some(&research)));
        assert!(!prompt.contains("LIVE WEB RESEARCH"));
    }
}
