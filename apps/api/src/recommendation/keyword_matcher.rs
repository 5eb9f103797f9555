//! Whole-word keyword matching, compiled once at engine construction.
//!
//! Every keyword becomes a case-insensitive pattern anchored with `\b` on each edge
//! that is a word character, so `director` never matches inside `directors` and
//! `cto` never matches inside `doctor`, while `c++` and `.net` still match.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

/// A fixed list of keywords with pre-compiled word-boundary matchers.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
    set: RegexSet,
    /// Longest-first alternation of every keyword; `None` when there are no keywords.
    counter: Option<Regex>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only where the keyword itself starts or ends with a word character.
fn boundary_pattern(keyword: &str) -> String {
    let lead = if keyword.starts_with(is_word_char) { r"\b" } else { "" };
    let trail = if keyword.ends_with(is_word_char) { r"\b" } else { "" };
    format!("{lead}{}{trail}", regex::escape(keyword))
}

impl KeywordMatcher {
    pub fn new<I, S>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let kw = keyword.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !normalized.contains(&kw) {
                normalized.push(kw);
            }
        }

        let sources: Vec<String> = normalized.iter().map(|k| boundary_pattern(k)).collect();
        let set = RegexSetBuilder::new(&sources)
            .case_insensitive(true)
            .build()?;
        let counter = if sources.is_empty() {
            None
        } else {
            let mut longest_first: Vec<(&str, &String)> = normalized
                .iter()
                .map(String::as_str)
                .zip(sources.iter())
                .collect();
            longest_first.sort_by_key(|(keyword, _)| std::cmp::Reverse(keyword.chars().count()));
            let alternation = longest_first
                .iter()
                .map(|(_, pattern)| format!("(?:{pattern})"))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self {
            keywords: normalized,
            set,
            counter,
        })
    }

    /// A matcher with no keywords; matches nothing.
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            set: RegexSet::empty(),
            counter: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Number of distinct keywords present in `text`.
    pub fn distinct_count(&self, text: &str) -> usize {
        if self.keywords.is_empty() {
            return 0;
        }
        self.set.matches(text).iter().count()
    }

    /// Non-overlapping keyword occurrences in `text`. At each position the longest
    /// keyword wins, so `product manager` counts once, not also as `product`.
    pub fn occurrences(&self, text: &str) -> usize {
        self.counter
            .as_ref()
            .map_or(0, |counter| counter.find_iter(text).count())
    }

    pub fn contains_any(&self, text: &str) -> bool {
        !self.keywords.is_empty() && self.set.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        let m = KeywordMatcher::new(["director"]).unwrap();
        assert!(m.contains_any("Director of Sales"));
        assert!(!m.contains_any("Board of Directors liaison"));
    }

    #[test]
    fn test_short_markers_do_not_match_inside_words() {
        let m = KeywordMatcher::new(["cto", "vp"]).unwrap();
        assert!(!m.contains_any("Doctor of Pharmacy"));
        assert!(m.contains_any("VP, Engineering"));
    }

    #[test]
    fn test_multi_word_keyword() {
        let m = KeywordMatcher::new(["head of", "product management"]).unwrap();
        assert_eq!(m.distinct_count("Head of Product Management"), 2);
        assert_eq!(m.distinct_count("Product manager, head office"), 0);
    }

    #[test]
    fn test_occurrences_counts_repeats() {
        let m = KeywordMatcher::new(["product", "roadmap"]).unwrap();
        assert_eq!(m.occurrences("product roadmap; product launch; PRODUCT"), 4);
        assert_eq!(m.distinct_count("product roadmap; product launch"), 2);
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let m = KeywordMatcher::new(["fp&a", "go-to-market"]).unwrap();
        assert!(m.contains_any("Led FP&A for the region"));
        assert!(m.contains_any("owned go-to-market planning"));
    }

    #[test]
    fn test_overlapping_keywords_count_once() {
        let m = KeywordMatcher::new(["product", "product manager", "product strategy"]).unwrap();
        assert_eq!(m.occurrences("Product manager who owns product strategy"), 2);
        assert_eq!(m.occurrences("product managers ship products and product"), 2);
    }

    #[test]
    fn test_symbol_edged_keywords_match() {
        let m = KeywordMatcher::new(["c++", "c#", ".net"]).unwrap();
        let text = "C++ Developer. Builds .NET and C# services.";
        assert_eq!(m.distinct_count(text), 3);
        assert_eq!(m.occurrences(text), 3);
        assert!(!m.contains_any("Plain C and Java"));
        // a word-character edge still needs a boundary
        assert!(!KeywordMatcher::new(["c#"]).unwrap().contains_any("abc# notes"));
    }

    #[test]
    fn test_empty_matcher_matches_nothing() {
        let m = KeywordMatcher::new(Vec::<String>::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.occurrences("anything"), 0);
        assert_eq!(m.distinct_count("anything"), 0);
    }

    #[test]
    fn test_explicit_empty_matcher() {
        let m = KeywordMatcher::empty();
        assert_eq!(m.len(), 0);
        assert!(!m.contains_any("anything"));
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let m = KeywordMatcher::new(["SQL", "sql", " sql "]).unwrap();
        assert_eq!(m.distinct_count("sql"), 1);
    }
}
