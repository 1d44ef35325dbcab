use serde::{Serialize, Deserialize};

use std::collections::HashMap;
use std::collections::hash_map;

use super::SfaWord;


/// A histogram of words for one series (bag-of-patterns),
/// tagged with the class label of that series if known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BagRepr", into = "BagRepr")]
pub struct Bag {
    counts: HashMap<SfaWord, u32>,
    label: Option<usize>,
}


impl Bag {
    /// Construct an empty bag without label.
    pub fn new() -> Self {
        Self::default()
    }


    /// Build a bag from the words of consecutive windows.
    ///
    /// If `numerosity_reduction` is `true`, a word equal to the word of
    /// the immediately preceding window is not counted again.
    /// Only consecutive duplicates are merged.
    pub fn from_words<I>(words: I, numerosity_reduction: bool) -> Self
        where I: IntoIterator<Item = SfaWord>,
    {
        let mut bag = Self::new();
        let mut last: Option<SfaWord> = None;

        for word in words {
            if numerosity_reduction && last == Some(word) {
                continue;
            }
            bag.insert(word);
            last = Some(word);
        }
        bag
    }


    /// Set the class label of this bag.
    pub fn with_label(mut self, label: Option<usize>) -> Self {
        self.label = label;
        self
    }


    /// Increment the count of `word`.
    #[inline]
    pub fn insert(&mut self, word: SfaWord) {
        *self.counts.entry(word).or_insert(0) += 1;
    }


    /// Returns the count of `word`, `0` if absent.
    #[inline(always)]
    pub fn count(&self, word: &SfaWord) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }


    /// Returns the class label.
    pub fn label(&self) -> Option<usize> {
        self.label
    }


    /// Returns the number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }


    /// Returns `true` if the bag has no word.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }


    /// Returns the sum of all counts.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }


    /// Iterate over `(word, count)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, SfaWord, u32> {
        self.counts.iter()
    }
}


impl<'a> IntoIterator for &'a Bag {
    type Item = (&'a SfaWord, &'a u32);
    type IntoIter = hash_map::Iter<'a, SfaWord, u32>;
    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}


// Word keys are structs, so a bag is stored as a list of pairs.
#[derive(Serialize, Deserialize)]
struct BagRepr {
    label: Option<usize>,
    counts: Vec<(SfaWord, u32)>,
}


impl From<Bag> for BagRepr {
    fn from(bag: Bag) -> Self {
        let mut counts = bag.counts.into_iter().collect::<Vec<_>>();
        counts.sort_unstable();
        Self { label: bag.label, counts }
    }
}


impl From<BagRepr> for Bag {
    fn from(repr: BagRepr) -> Self {
        Self { counts: repr.counts.into_iter().collect(), label: repr.label }
    }
}
