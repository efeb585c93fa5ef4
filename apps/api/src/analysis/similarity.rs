//! Lexical similarity between the resume and each required skill.
//!
//! Corpus = `[cleaned resume] + skills`. Every document is vectorised with TF-IDF using the
//! usual vectoriser defaults: terms are runs of 2+ word characters (lowercased), raw
//! counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, L2-normalised rows. The score of a
//! skill is the cosine between its row and the resume row.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::nlp::StopwordFilter;

static TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Sparse term-index → weight vector.
pub type SparseVector = BTreeMap<usize, f64>;

/// Keeps alphanumeric, non-stopword tokens, lowercased and joined by single spaces.
///
/// Punctuation glued to a word ("Python," "(Rust)") is split off first, then a trailing
/// clitic ("Python's", "don't") is split from its word. Tokens still carrying inner
/// punctuation ("CI/CD") are dropped as not alphanumeric.
pub fn clean_text(text: &str, stopwords: &StopwordFilter) -> String {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .map(strip_clitic)
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphanumeric))
        .filter(|token| !stopwords.is_stopword(token))
        .map(|token| token.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drops a trailing contraction or possessive: "Python's" → "Python", "don't" → "do".
fn strip_clitic(token: &str) -> &str {
    let Some(apostrophe) = token.rfind(['\'', '\u{2019}']) else {
        return token;
    };
    let word = &token[..apostrophe];
    let clitic = token[apostrophe..]
        .chars()
        .skip(1)
        .collect::<String>()
        .to_lowercase();
    match clitic.as_str() {
        "t" if word.len() > 1 && word.to_lowercase().ends_with('n') => &word[..word.len() - 1],
        "s" | "re" | "ve" | "ll" | "d" | "m" => word,
        _ => token,
    }
}

/// Splits a document into lowercase terms.
pub fn terms(doc: &str) -> Vec<String> {
    TERM_RE
        .find_iter(doc)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Vocabulary and idf weights fitted on a small corpus.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    pub fn fit(corpus: &[&str]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let mut seen: Vec<String> = terms(doc);
            seen.sort();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    #[cfg(test)]
    fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// L2-normalised tf-idf row for `doc`. Empty when no term is in the vocabulary.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for term in terms(doc) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.values_mut().for_each(|w| *w /= norm);
        }
        row
    }
}

/// Cosine similarity of two sparse vectors. Zero vectors give 0.0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(index, wa)| b.get(index).map(|wb| wa * wb))
        .sum();
    // An empty f64 sum is -0.0; no shared term means no similarity.
    if dot.is_nan() || dot <= 0.0 {
        return 0.0;
    }
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// One similarity score in [0, 1] per skill, in input order.
pub fn analyze_resume(text: &str, skills: &[String], stopwords: &StopwordFilter) -> Vec<f64> {
    let cleaned = clean_text(text, stopwords);

    let mut corpus: Vec<&str> = Vec::with_capacity(skills.len() + 1);
    corpus.push(&cleaned);
    corpus.extend(skills.iter().map(String::as_str));

    let model = TfidfModel::fit(&corpus);
    let resume_row = model.transform(&cleaned);

    skills
        .iter()
        .map(|skill| {
            let score = cosine_similarity(&resume_row, &model.transform(skill));
            if score.is_finite() && score > 0.0 {
                score.min(1.0)
            } else {
                0.0
            }
        })
        .collect()
}
