//! Minimal BM25-style lexical scorer. The fusion contract only requires
//! monotonicity in term-match quality, so this keeps the standard
//! Okapi BM25 formula without stemming or stop-word removal.

use std::collections::HashMap;

const K1: f64 = 1.5;
const B: f64 = 0.75;

pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub struct Bm25Index {
    doc_term_freqs: Vec<HashMap<String, u32>>,
    doc_lengths: Vec<usize>,
    doc_freq: HashMap<String, usize>,
    avg_doc_length: f64,
}

impl Default for Bm25Index {
    fn default() -> Self {
        Self::new()
    }
}

impl Bm25Index {
    pub fn new() -> Self {
        Self {
            doc_term_freqs: Vec::new(),
            doc_lengths: Vec::new(),
            doc_freq: HashMap::new(),
            avg_doc_length: 0.0,
        }
    }

    pub fn add_document(&mut self, content: &str) -> usize {
        let tokens = tokenize(content);
        let mut freqs: HashMap<String, u32> = HashMap::new();
        for t in &tokens {
            *freqs.entry(t.clone()).or_insert(0) += 1;
        }
        for term in freqs.keys() {
            *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
        }
        self.doc_lengths.push(tokens.len());
        self.doc_term_freqs.push(freqs);

        let total: usize = self.doc_lengths.iter().sum();
        self.avg_doc_length = total as f64 / self.doc_lengths.len() as f64;

        self.doc_term_freqs.len() - 1
    }

    /// BM25 score of `query` against document at `doc_index`.
    pub fn score(&self, doc_index: usize, query_terms: &[String]) -> f64 {
        let n = self.doc_term_freqs.len() as f64;
        let freqs = &self.doc_term_freqs[doc_index];
        let doc_len = self.doc_lengths[doc_index] as f64;
        let mut score = 0.0;
        for term in query_terms {
            let Some(&tf) = freqs.get(term) else {
                continue;
            };
            let df = *self.doc_freq.get(term).unwrap_or(&0) as f64;
            if df == 0.0 {
                continue;
            }
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
            let tf = tf as f64;
            let denom = tf + K1 * (1.0 - B + B * doc_len / self.avg_doc_length.max(1.0));
            score += idf * (tf * (K1 + 1.0)) / denom.max(f64::EPSILON);
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_higher_than_no_match() {
        let mut idx = Bm25Index::new();
        idx.add_document("pricing plans and pricing tiers");
        idx.add_document("about our company history");
        let query = tokenize("pricing");
        let s0 = idx.score(0, &query);
        let s1 = idx.score(1, &query);
        assert!(s0 > s1);
    }
}
