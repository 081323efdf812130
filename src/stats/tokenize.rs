//! Text tokenization and the word lexicon.
//!
//! `tokenize` is a single linear scan: lowercased alphanumeric runs become
//! tokens, everything else is a separator. `Lexicon::words` narrows the
//! token multiset down to the dictionary words that count toward the
//! word-frequency and page-length statistics.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Count every token in `text`. A token is a maximal run of alphanumeric
/// characters, lowercased.
#[must_use]
pub fn tokenize(text: &str) -> BTreeMap<String, u64> {
    let mut tokens = BTreeMap::new();
    let mut buffer = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            buffer.extend(ch.to_lowercase());
        } else if !buffer.is_empty() {
            *tokens.entry(std::mem::take(&mut buffer)).or_insert(0) += 1;
        }
    }
    if !buffer.is_empty() {
        *tokens.entry(buffer).or_insert(0) += 1;
    }

    tokens
}

/// The stopword list and English dictionary consulted by `words`.
///
/// Both sets are loaded once at startup; workers share one instance.
pub struct Lexicon {
    stopwords: HashSet<String>,
    dictionary: HashSet<String>,
}

impl Lexicon {
    /// Load the stopword file and dictionary file. Both are
    /// whitespace-separated word lists.
    pub fn load(stopwords_file: &Path, dictionary_file: &Path) -> Result<Self> {
        let stopwords = read_word_set(stopwords_file)
            .with_context(|| format!("failed to load stopwords from {}", stopwords_file.display()))?;
        ensure!(
            !stopwords.is_empty(),
            "stopword file {} is empty",
            stopwords_file.display()
        );

        let dictionary = read_word_set(dictionary_file).with_context(|| {
            format!("failed to load dictionary from {}", dictionary_file.display())
        })?;
        ensure!(
            !dictionary.is_empty(),
            "dictionary file {} is empty",
            dictionary_file.display()
        );

        Ok(Self { stopwords, dictionary })
    }

    /// Build a lexicon from in-memory word lists.
    pub fn from_words<S, D>(stopwords: S, dictionary: D) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            dictionary: dictionary.into_iter().map(Into::into).collect(),
        }
    }

    /// Count the words in `text`: tokens longer than one character that are
    /// in the dictionary and not stopwords.
    #[must_use]
    pub fn words(&self, text: &str) -> BTreeMap<String, u64> {
        tokenize(text)
            .into_iter()
            .filter(|(token, _)| {
                token.chars().count() > 1
                    && !self.stopwords.contains(token)
                    && self.dictionary.contains(token)
            })
            .collect()
    }
}

fn read_word_set(path: &Path) -> Result<HashSet<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents.split_whitespace().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_non_alphanumerics() {
        let tokens = tokenize("Hello, world! hello-again 42");
        assert_eq!(tokens.get("hello"), Some(&2));
        assert_eq!(tokens.get("world"), Some(&1));
        assert_eq!(tokens.get("again"), Some(&1));
        assert_eq!(tokens.get("42"), Some(&1));
    }

    #[test]
    fn tokenize_flushes_trailing_buffer() {
        let tokens = tokenize("trailing");
        assert_eq!(tokens.get("trailing"), Some(&1));
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ... !!! ").is_empty());
    }

    #[test]
    fn words_filters_stopwords_short_tokens_and_non_dictionary() {
        let lexicon = Lexicon::from_words(["the"], ["computer", "science", "the", "a"]);
        let words = lexicon.words("The computer: a science? qwzx computer");
        assert_eq!(words.get("computer"), Some(&2));
        assert_eq!(words.get("science"), Some(&1));
        // stopword
        assert_eq!(words.get("the"), None);
        // single character
        assert_eq!(words.get("a"), None);
        // not in dictionary
        assert_eq!(words.get("qwzx"), None);
    }
}
