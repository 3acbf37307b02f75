//! Folds per-document extraction into frequency and sentence-length tallies.

use crate::document::NafDocument;
use crate::error::Result;
use crate::extractor;
use crate::models::ItemKind;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Occurrence counts keyed by string, remembering first-insertion order so
/// that ranking ties always come out the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: &str, n: u64) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), n));
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    /// Adds every count of `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyCounter) {
        for (key, n) in other.iter() {
            self.add_n(key, n);
        }
    }

    /// The `n` highest counts, descending; equal counts keep insertion order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<S: AsRef<str>> Extend<S> for FrequencyCounter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyCounter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counter = FrequencyCounter::new();
        counter.extend(iter);
        counter
    }
}

impl Serialize for FrequencyCounter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, n) in &self.entries {
            map.serialize_entry(key, n)?;
        }
        map.end()
    }
}

/// Sentence id to number of word tokens in that sentence.
pub fn sentence_length_map(doc: &NafDocument) -> FrequencyCounter {
    extractor::sentence_ids(doc).collect()
}

/// Token or type counts summed over every document.
pub fn corpus_frequency(kind: ItemKind, docs: &[PathBuf]) -> Result<FrequencyCounter> {
    let mut counter = FrequencyCounter::new();
    for path in docs {
        let doc = NafDocument::load(path)?;
        match kind {
            ItemKind::Token => counter.extend(extractor::tokens(&doc)),
            ItemKind::Type => counter.extend(extractor::types(&doc)),
        }
        debug!("{:?}: {} distinct {}s so far", path, counter.len(), kind);
    }
    Ok(counter)
}

/// Sentence-length maps for a set of documents, in selection order.
#[derive(Debug, Clone, Default)]
pub struct SentenceMaps {
    index: HashMap<PathBuf, usize>,
    entries: Vec<(PathBuf, FrequencyCounter)>,
}

impl SentenceMaps {
    /// Inserts or replaces the map for `path`, keeping its original position.
    pub fn insert(&mut self, path: PathBuf, lengths: FrequencyCounter) {
        match self.index.get(&path) {
            Some(&i) => self.entries[i].1 = lengths,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, lengths));
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn get(&self, path: &Path) -> Option<&FrequencyCounter> {
        self.index.get(path).map(|&i| &self.entries[i].1)
    }

    /// Number of distinct documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &FrequencyCounter)> + '_ {
        self.entries.iter().map(|(p, lengths)| (p.as_path(), lengths))
    }
}

pub fn per_document_sentence_maps(docs: &[PathBuf]) -> Result<SentenceMaps> {
    let mut maps = SentenceMaps::default();
    for path in docs {
        // A path selected twice yields the same map.
        if maps.contains(path) {
            continue;
        }
        let doc = NafDocument::load(path)?;
        let lengths = sentence_length_map(&doc);
        debug!("{:?}: {} sentence(s)", path, lengths.len());
        maps.insert(path.clone(), lengths);
    }
    Ok(maps)
}

/// Entity surface-string counts; with `marker`, only entities whose type tag
/// contains it are counted.
pub fn entity_frequency(docs: &[PathBuf], marker: Option<&str>) -> Result<FrequencyCounter> {
    let mut counter = FrequencyCounter::new();
    for path in docs {
        let doc = NafDocument::load(path)?;
        for mention in extractor::entity_targets(&doc) {
            let mention = mention?;
            if marker.map_or(true, |m| mention.kind.contains(m)) {
                counter.add(&mention.surface);
            }
        }
    }
    Ok(counter)
}
