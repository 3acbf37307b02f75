//! Lazy element extraction over a loaded [`NafDocument`].
//!
//! Every sequence borrows the document and yields items on demand; calling the
//! function again starts a fresh pass.

use crate::classifier::is_word;
use crate::document::NafDocument;
use crate::error::{CorpusError, Result};
use std::collections::HashMap;

/// An entity resolved to its surface string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMention<'a> {
    pub kind: &'a str,
    pub surface: String,
}

/// Word-form texts that count as words.
pub fn tokens(doc: &NafDocument) -> impl Iterator<Item = &str> + '_ {
    doc.word_forms()
        .iter()
        .map(|wf| wf.text.as_str())
        .filter(|text| is_word(text))
}

/// Term lemmas that count as words.
pub fn types(doc: &NafDocument) -> impl Iterator<Item = &str> + '_ {
    doc.terms()
        .iter()
        .map(|term| term.lemma.as_str())
        .filter(|lemma| is_word(lemma))
}

/// Sentence id of every word form whose text counts as a word.
pub fn sentence_ids(doc: &NafDocument) -> impl Iterator<Item = &str> + '_ {
    doc.word_forms()
        .iter()
        .filter(|wf| is_word(&wf.text))
        .map(|wf| wf.sent.as_str())
}

/// Term id to lemma for every term, words or not.
pub fn id_to_lemma(doc: &NafDocument) -> HashMap<&str, &str> {
    doc.terms()
        .iter()
        .map(|term| (term.id.as_str(), term.lemma.as_str()))
        .collect()
}

/// Resolves each entity's targets to lemmas and joins them with single spaces.
/// A target that names no term yields [`CorpusError::UnresolvedTarget`].
pub fn entity_targets(doc: &NafDocument) -> impl Iterator<Item = Result<EntityMention<'_>>> + '_ {
    let lemmas = id_to_lemma(doc);
    doc.entities().iter().map(move |entity| {
        let words = entity
            .targets
            .iter()
            .map(|id| {
                lemmas
                    .get(id.as_str())
                    .copied()
                    .ok_or_else(|| CorpusError::UnresolvedTarget {
                        path: doc.path().to_path_buf(),
                        target: id.clone(),
                    })
            })
            .collect::<Result<Vec<&str>>>()?;
        Ok(EntityMention {
            kind: entity.kind.as_str(),
            surface: words.join(" "),
        })
    })
}

/// The full text of one sentence: every word form with that sentence id,
/// punctuation included, separated by single spaces.
pub fn sentence_text(doc: &NafDocument, sent_id: &str) -> String {
    doc.word_forms()
        .iter()
        .filter(|wf| wf.sent == sent_id)
        .map(|wf| wf.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
