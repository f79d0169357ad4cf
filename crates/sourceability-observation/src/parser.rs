//! Extracts mentions, citations, sentiment, and confidence signals out of
//! a raw provider response. Grounded on
//! `original_source/worker/observation/parser.py`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionType {
    Exact,
    Partial,
    Domain,
    Url,
    Branded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationType {
    DirectQuote,
    Attribution,
    SourceLink,
    Reference,
    Implicit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservedConfidence {
    High,
    Medium,
    Low,
    Uncertain,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub text: String,
    pub mention_type: MentionType,
    pub position: usize,
    pub context: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub pattern: String,
    pub citation_type: CitationType,
    pub source_text: String,
    pub url: Option<String>,
    pub position: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedObservation {
    pub mentions: Vec<Mention>,
    pub mention_count: usize,
    pub has_company_mention: bool,
    pub has_domain_mention: bool,
    pub has_url_citation: bool,

    pub citations: Vec<Citation>,
    pub citation_count: usize,
    pub has_explicit_citation: bool,

    pub all_urls: Vec<String>,
    pub company_urls: Vec<String>,
    pub external_urls: Vec<String>,

    pub overall_sentiment: Option<Sentiment>,
    pub sentiment_score: f64,

    pub confidence_level: Option<ObservedConfidence>,
    pub hedging_phrases: Vec<String>,
    pub certainty_phrases: Vec<String>,

    pub response_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,

    pub is_refusal: bool,
    pub is_uncertain: bool,
    pub is_hallucination_risk: bool,
}

const HEDGING_PHRASES: &[&str] = &[
    "i'm not sure",
    "i don't know",
    "i cannot confirm",
    "i'm unable to verify",
    "it's unclear",
    "i don't have information",
    "i cannot find",
    "may or may not",
    "might be",
    "could be",
    "possibly",
    "perhaps",
    "it seems",
    "appears to be",
    "reportedly",
    "allegedly",
    "i believe",
    "i think",
    "as far as i know",
    "to my knowledge",
];

const CERTAINTY_PHRASES: &[&str] = &[
    "definitely",
    "certainly",
    "absolutely",
    "without a doubt",
    "i can confirm",
    "it is clear that",
    "clearly",
    "obviously",
    "undoubtedly",
    "for certain",
    "in fact",
    "indeed",
    "specifically",
    "precisely",
];

const POSITIVE_INDICATORS: &[&str] = &[
    "excellent", "great", "outstanding", "impressive", "innovative", "leading", "best", "top",
    "premier", "trusted", "reliable", "recommended", "praised", "acclaimed", "award-winning",
    "renowned", "successful", "effective", "efficient", "quality", "superior",
];

const NEGATIVE_INDICATORS: &[&str] = &[
    "poor", "bad", "disappointing", "problematic", "issues", "complaints", "criticized",
    "concerns", "lacking", "limited", "struggling", "failed", "controversial", "negative",
    "unreliable", "questionable", "inferior", "subpar", "inadequate", "deficient",
];

const CORPORATE_SUFFIXES: &[&str] = &[
    " Inc", " Inc.", " LLC", " Ltd", " Ltd.", " Co", " Co.", " Corp", " Corp.", " Corporation",
    " Company", " Technologies", " Tech", " Software", " Solutions", " Services", " Group",
    " Holdings",
];

static CITATION_PATTERNS: Lazy<Vec<(Regex, CitationType)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)according to ([^,.]+)").unwrap(),
            CitationType::DirectQuote,
        ),
        (
            Regex::new(r"(?i)as (?:stated|reported|mentioned) by ([^,.]+)").unwrap(),
            CitationType::Attribution,
        ),
        (
            Regex::new(r"(?i)([^,.]+) (?:states?|reports?|says?|mentions?) that").unwrap(),
            CitationType::Attribution,
        ),
        (
            Regex::new(r"(?im)source:\s*([^\n]+)").unwrap(),
            CitationType::SourceLink,
        ),
        (
            Regex::new(r"(?i)from (?:the )?([^,.]+) website").unwrap(),
            CitationType::Reference,
        ),
        (
            Regex::new(r"(?i)based on (?:information from )?([^,.]+)").unwrap(),
            CitationType::Reference,
        ),
        (
            Regex::new(r"(?i)(?:visit|see|check out|more at)\s+(https?://\S+)").unwrap(),
            CitationType::SourceLink,
        ),
    ]
});

static REFUSAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)i (?:cannot|can't|am unable to) (?:provide|give|answer)",
        r"(?i)i don't have (?:access to|information about)",
        r"(?i)i'm not able to",
        r"(?i)this is outside (?:my|the scope)",
        r"(?i)i cannot assist with",
        r"(?i)i'm sorry,? but i (?:cannot|can't)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).unwrap());
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static DOLLAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[\d,]+").unwrap());
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());
static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+%").unwrap());
static FOUNDED_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)founded in \d{4}").unwrap());
static HQ_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"headquartered in [A-Z][a-z]+").unwrap());

pub fn parse_observation(
    content: &str,
    company_name: &str,
    domain: &str,
    branded_terms: &[String],
) -> ParsedObservation {
    let content_lower = content.to_lowercase();
    let mut result = ParsedObservation {
        response_length: content.chars().count(),
        word_count: content.split_whitespace().count(),
        sentence_count: SENTENCE_BOUNDARY.find_iter(content).count(),
        ..Default::default()
    };

    result.mentions = extract_mentions(content, company_name, domain, branded_terms);
    result.mention_count = result.mentions.len();
    result.has_company_mention = result
        .mentions
        .iter()
        .any(|m| matches!(m.mention_type, MentionType::Exact | MentionType::Partial));
    result.has_domain_mention = result.mentions.iter().any(|m| m.mention_type == MentionType::Domain);
    result.has_url_citation = result.mentions.iter().any(|m| m.mention_type == MentionType::Url);

    let (all_urls, company_urls, external_urls) = extract_urls(content, domain);
    result.all_urls = all_urls;
    result.company_urls = company_urls;
    result.external_urls = external_urls;

    result.citations = extract_citations(content, company_name);
    result.citation_count = result.citations.len();
    result.has_explicit_citation = result
        .citations
        .iter()
        .any(|c| c.citation_type != CitationType::Implicit);

    let (sentiment, score) = analyze_sentiment(&content_lower);
    result.overall_sentiment = Some(sentiment);
    result.sentiment_score = score;

    let (level, hedging, certainty) = analyze_confidence(&content_lower);
    result.confidence_level = Some(level);
    result.hedging_phrases = hedging;
    result.certainty_phrases = certainty;

    result.is_refusal = REFUSAL_PATTERNS.iter().any(|r| r.is_match(&content_lower));
    result.is_uncertain = matches!(
        result.confidence_level,
        Some(ObservedConfidence::Low) | Some(ObservedConfidence::Uncertain)
    ) || result.hedging_phrases.len() > 2;
    result.is_hallucination_risk = check_hallucination_risk(content, &result);

    result
}

fn name_variations(company_name: &str) -> Vec<String> {
    let mut variations = vec![company_name.to_string()];
    let name_lower = company_name.to_lowercase();

    for suffix in CORPORATE_SUFFIXES {
        if name_lower.ends_with(&suffix.to_lowercase()) {
            let base = company_name[..company_name.len() - suffix.len()].trim().to_string();
            if !base.is_empty() && !variations.contains(&base) {
                variations.push(base);
            }
        }
    }

    if name_lower.starts_with("the ") {
        let without_the = company_name[4..].to_string();
        if !variations.contains(&without_the) {
            variations.push(without_the);
        }
    }

    let words: Vec<&str> = company_name.split_whitespace().collect();
    let start_idx = if words.first().map(|w| w.to_lowercase()) == Some("the".to_string()) {
        1
    } else {
        0
    };
    if words.len() > start_idx + 1 && words.get(start_idx).map_or(0, |w| w.len()) >= 3 {
        let first = words[start_idx].to_string();
        if !variations.contains(&first) {
            variations.push(first);
        }
    }

    variations
}

fn context_window(content: &str, start: usize, end: usize, pad: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    let s = start.saturating_sub(pad);
    let e = (end + pad).min(chars.len());
    chars[s..e].iter().collect()
}

fn extract_mentions(
    content: &str,
    company_name: &str,
    domain: &str,
    branded_terms: &[String],
) -> Vec<Mention> {
    let content_lower = content.to_lowercase();
    let mut mentions = Vec::new();

    for variation in name_variations(company_name) {
        let var_lower = variation.to_lowercase();
        if var_lower.is_empty() {
            continue;
        }
        for (start, part) in find_all(&content_lower, &var_lower) {
            let end = start + part.len();
            let context = context_window(content, start, end, 50);
            let (mention_type, confidence) = if var_lower == company_name.to_lowercase() {
                (MentionType::Exact, 1.0)
            } else {
                (MentionType::Partial, variation.len() as f64 / company_name.len() as f64)
            };
            mentions.push(Mention {
                text: content[start..end].to_string(),
                mention_type,
                position: start,
                context,
                confidence,
            });
        }
    }

    let domain_lower = domain.to_lowercase();
    if !domain_lower.is_empty() {
        for (start, part) in find_all(&content_lower, &domain_lower) {
            let end = start + part.len();
            mentions.push(Mention {
                text: content[start..end].to_string(),
                mention_type: MentionType::Domain,
                position: start,
                context: context_window(content, start, end, 50),
                confidence: 1.0,
            });
        }

        if let Ok(url_re) = Regex::new(&format!(
            r"(?i)https?://(?:www\.)?{}[^\s]*",
            regex::escape(&domain_lower)
        )) {
            for m in url_re.find_iter(&content_lower) {
                mentions.push(Mention {
                    text: content[m.start()..m.end()].to_string(),
                    mention_type: MentionType::Url,
                    position: m.start(),
                    context: context_window(content, m.start(), m.end(), 30),
                    confidence: 1.0,
                });
            }
        }
    }

    for term in branded_terms {
        let term_lower = term.to_lowercase();
        if term_lower.is_empty() {
            continue;
        }
        for (start, part) in find_all(&content_lower, &term_lower) {
            let end = start + part.len();
            mentions.push(Mention {
                text: content[start..end].to_string(),
                mention_type: MentionType::Branded,
                position: start,
                context: context_window(content, start, end, 50),
                confidence: 0.9,
            });
        }
    }

    mentions.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<Mention> = mentions
        .into_iter()
        .filter(|m| seen.insert(m.position))
        .collect();
    unique.sort_by_key(|m| m.position);
    unique
}

fn find_all(haystack: &str, needle: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut start = 0;
    while let Some(idx) = haystack[start..].find(needle) {
        let pos = start + idx;
        out.push((pos, needle.to_string()));
        start = pos + needle.len();
    }
    out
}

fn extract_urls(content: &str, domain: &str) -> (Vec<String>, Vec<String>, Vec<String>) {
    let all_urls: Vec<String> = URL_PATTERN.find_iter(content).map(|m| m.as_str().to_string()).collect();
    let domain_lower = domain.to_lowercase();
    let mut company_urls = Vec::new();
    let mut external_urls = Vec::new();
    for url in &all_urls {
        if !domain_lower.is_empty() && url.to_lowercase().contains(&domain_lower) {
            company_urls.push(url.clone());
        } else {
            external_urls.push(url.clone());
        }
    }
    (all_urls, company_urls, external_urls)
}

fn extract_citations(content: &str, company_name: &str) -> Vec<Citation> {
    let mut citations = Vec::new();

    for (pattern, citation_type) in CITATION_PATTERNS.iter() {
        for caps in pattern.captures_iter(content) {
            let whole = caps.get(0).unwrap();
            let source_text = caps.get(1).map(|g| g.as_str()).unwrap_or(whole.as_str());
            let url = URL_PATTERN.find(source_text).map(|m| m.as_str().to_string());
            citations.push(Citation {
                pattern: whole.as_str().to_string(),
                citation_type: *citation_type,
                source_text: source_text.trim().to_string(),
                url,
                position: whole.start(),
            });
        }
    }

    let company_lower = company_name.to_lowercase();
    if !company_lower.is_empty() && content.to_lowercase().contains(&company_lower) && citations.is_empty() {
        let pos = content.to_lowercase().find(&company_lower).unwrap_or(0);
        citations.push(Citation {
            pattern: format!("mentions {company_name}"),
            citation_type: CitationType::Implicit,
            source_text: company_name.to_string(),
            url: None,
            position: pos,
        });
    }

    citations.sort_by_key(|c| c.position);
    citations
}

fn analyze_sentiment(content_lower: &str) -> (Sentiment, f64) {
    let positive_count = POSITIVE_INDICATORS.iter().filter(|w| content_lower.contains(*w)).count();
    let negative_count = NEGATIVE_INDICATORS.iter().filter(|w| content_lower.contains(*w)).count();

    let total = positive_count + negative_count;
    if total == 0 {
        return (Sentiment::Neutral, 0.0);
    }

    let score = (positive_count as f64 - negative_count as f64) / total as f64;
    let sentiment = if score > 0.3 {
        Sentiment::Positive
    } else if score < -0.3 {
        Sentiment::Negative
    } else if positive_count > 0 && negative_count > 0 {
        Sentiment::Mixed
    } else {
        Sentiment::Neutral
    };

    (sentiment, score)
}

fn analyze_confidence(content_lower: &str) -> (ObservedConfidence, Vec<String>, Vec<String>) {
    let hedging: Vec<String> = HEDGING_PHRASES
        .iter()
        .filter(|p| content_lower.contains(*p))
        .map(|p| p.to_string())
        .collect();
    let certainty: Vec<String> = CERTAINTY_PHRASES
        .iter()
        .filter(|p| content_lower.contains(*p))
        .map(|p| p.to_string())
        .collect();

    let h = hedging.len();
    let c = certainty.len();
    let level = if h == 0 && c == 0 {
        ObservedConfidence::Unknown
    } else if h > c * 2 {
        ObservedConfidence::Low
    } else if c > h * 2 {
        ObservedConfidence::High
    } else if h > c {
        ObservedConfidence::Uncertain
    } else {
        ObservedConfidence::Medium
    };

    (level, hedging, certainty)
}

fn check_hallucination_risk(content: &str, parsed: &ParsedObservation) -> bool {
    if parsed.confidence_level == Some(ObservedConfidence::High)
        && !parsed.has_explicit_citation
        && parsed.mention_count > 0
    {
        return true;
    }

    let specific_claims = [
        DOLLAR_PATTERN.is_match(content),
        YEAR_PATTERN.is_match(content),
        PERCENT_PATTERN.is_match(content),
        FOUNDED_PATTERN.is_match(content),
        HQ_PATTERN.is_match(content),
    ]
    .iter()
    .filter(|b| **b)
    .count();

    specific_claims >= 3 && !parsed.has_explicit_citation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_exact_company_mention_and_domain() {
        let parsed = parse_observation(
            "Acme Corp provides cloud storage. Visit acme.com for more.",
            "Acme Corp",
            "acme.com",
            &[],
        );
        assert!(parsed.has_company_mention);
        assert!(parsed.has_domain_mention);
    }

    #[test]
    fn classifies_direct_quote_citation() {
        let parsed = parse_observation(
            "According to Acme, they ship globally.",
            "Acme",
            "acme.com",
            &[],
        );
        assert!(parsed.citations.iter().any(|c| c.citation_type == CitationType::DirectQuote));
    }

    #[test]
    fn refusal_is_detected() {
        let parsed = parse_observation(
            "I'm sorry, but I cannot provide information about that company.",
            "Acme",
            "acme.com",
            &[],
        );
        assert!(parsed.is_refusal);
    }

    #[test]
    fn neutral_sentiment_when_no_indicators() {
        let parsed = parse_observation("Acme is a company.", "Acme", "acme.com", &[]);
        assert_eq!(parsed.overall_sentiment, Some(Sentiment::Neutral));
        assert_eq!(parsed.sentiment_score, 0.0);
    }
}
