use rand::Rng;
use std::collections::BTreeMap;
use thiserror::Error;

/// Categories and words the default bank is built from
const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Animals",
        &["elephant", "giraffe", "penguin", "rhinoceros", "cheetah"],
    ),
    (
        "Countries",
        &["france", "brazil", "japan", "australia", "canada"],
    ),
    ("Foods", &["pizza", "sushi", "burger", "chocolate", "salad"]),
];

/// Reasons a word bank can be rejected at construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordBankError {
    #[error("word bank must contain at least one category")]
    NoCategories,
    #[error("category '{0}' has no words")]
    EmptyCategory(String),
    #[error("word '{word}' in category '{category}' must be non-empty lowercase a-z")]
    InvalidWord { category: String, word: String },
    #[error("word '{word}' appears more than once in category '{category}'")]
    DuplicateWord { category: String, word: String },
}

/// A named list of candidate words
#[derive(Debug, Clone)]
struct Category {
    name: String,
    words: Vec<String>,
}

/// Immutable catalog of categories and the words that can be drawn from them
///
/// Categories are kept sorted by name so that selection with a seeded
/// random source is reproducible.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<Category>,
}

impl WordBank {
    /// Build a word bank from a category -> words mapping
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping is empty, a category has no words,
    /// a word is empty or contains anything other than `a`-`z`, or a word
    /// is repeated within its category.
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Result<Self, WordBankError> {
        if categories.is_empty() {
            return Err(WordBankError::NoCategories);
        }

        let mut validated = Vec::with_capacity(categories.len());
        for (name, words) in categories {
            if words.is_empty() {
                return Err(WordBankError::EmptyCategory(name));
            }

            for (index, word) in words.iter().enumerate() {
                if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
                    return Err(WordBankError::InvalidWord {
                        category: name,
                        word: word.clone(),
                    });
                }

                if words[..index].contains(word) {
                    return Err(WordBankError::DuplicateWord {
                        category: name,
                        word: word.clone(),
                    });
                }
            }

            validated.push(Category { name, words });
        }

        Ok(Self {
            categories: validated,
        })
    }

    /// Build a word bank from static string slices
    ///
    /// # Errors
    ///
    /// Same validation as [`WordBank::new`].
    pub fn from_static(categories: &[(&str, &[&str])]) -> Result<Self, WordBankError> {
        let mut mapping: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, words) in categories {
            mapping
                .entry((*name).to_string())
                .or_default()
                .extend(words.iter().map(|w| (*w).to_string()));
        }
        Self::new(mapping)
    }

    /// Pick a category uniformly at random, then a word uniformly from it
    ///
    /// # Arguments
    ///
    /// * `rng` - Random source; pass a seeded RNG for deterministic picks
    ///
    /// # Returns
    ///
    /// Tuple of (category, word)
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, &str) {
        // Construction guarantees every range below is non-empty
        let category = &self.categories[rng.gen_range(0..self.categories.len())];
        let word = &category.words[rng.gen_range(0..category.words.len())];
        (category.name.as_str(), word.as_str())
    }

    /// Category names in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Words of a single category, in their original order
    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.words.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        let mut categories: Vec<Category> = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, words)| Category {
                name: (*name).to_string(),
                words: words.iter().map(|w| (*w).to_string()).collect(),
            })
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Self { categories }
    }
}
