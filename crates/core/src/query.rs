//! Analytic queries composed from selection, extraction and aggregation.
//!
//! Every public query returns a [`QueryResult`]: bad user input comes back as
//! [`Outcome::Rejected`], while data problems (unresolvable entity targets,
//! unreadable documents, a division with nothing to divide by) stay errors.

use crate::aggregator::{self, FrequencyCounter};
use crate::config::{AppConfig, EntityConfig};
use crate::document::NafDocument;
use crate::error::{CorpusError, InvalidArgument, Result};
use crate::extractor;
use crate::models::{EntityKind, ItemKind};
use crate::scanner::Corpus;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Answer(T),
    Rejected(InvalidArgument),
}

impl<T> Outcome<T> {
    pub fn answer(self) -> Option<T> {
        match self {
            Outcome::Answer(v) => Some(v),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

pub type QueryResult<T> = std::result::Result<Outcome<T>, CorpusError>;

/// Splits a query result at the user boundary: argument errors become a
/// rejection, everything else propagates.
fn at_boundary<T>(result: Result<T>) -> QueryResult<T> {
    match result {
        Ok(v) => Ok(Outcome::Answer(v)),
        Err(CorpusError::InvalidArgument(e)) => {
            warn!("query rejected: {}", e);
            Ok(Outcome::Rejected(e))
        }
        Err(e) => Err(e),
    }
}

/// Runs `query` with an argument parsed from user input, turning a parse
/// failure into a rejection.
pub fn with_arg<A, T>(
    arg: std::result::Result<A, InvalidArgument>,
    query: impl FnOnce(A) -> QueryResult<T>,
) -> QueryResult<T> {
    match arg {
        Ok(a) => query(a),
        Err(e) => at_boundary(Err(e.into())),
    }
}

fn ratio(numerator: u64, denominator: u64, quantity: &'static str) -> Result<f64> {
    if denominator == 0 {
        return Err(CorpusError::EmptyCorpus { quantity });
    }
    Ok(numerator as f64 / denominator as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongSentence {
    /// Number of sentences emitted up to and including this one's length bucket.
    pub rank: usize,
    pub length: u64,
    pub source: PathBuf,
    pub sentence_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub rank: usize,
    pub item: String,
    pub frequency: u64,
}

/// Runs queries against one configured corpus.
#[derive(Debug, Clone)]
pub struct Analyzer {
    corpus: Corpus,
    entities: EntityConfig,
}

impl Analyzer {
    pub fn new(corpus: Corpus, entities: EntityConfig) -> Self {
        Self { corpus, entities }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            Corpus::from_config(&cfg.corpus)?,
            cfg.entities.clone(),
        ))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn select_files(&self, programs: &[String], languages: &[String]) -> QueryResult<Vec<PathBuf>> {
        at_boundary(self.corpus.select_files(programs, languages))
    }

    pub fn frequency(
        &self,
        kind: ItemKind,
        programs: &[String],
        languages: &[String],
    ) -> QueryResult<FrequencyCounter> {
        at_boundary(self.corpus.select_files(programs, languages).and_then(|files| {
            info!("counting {}s over {} document(s)", kind, files.len());
            aggregator::corpus_frequency(kind, &files)
        }))
    }

    /// Tokens per document (all occurrences) or types per document (distinct lemmas).
    pub fn average_items(
        &self,
        kind: ItemKind,
        programs: &[String],
        languages: &[String],
    ) -> QueryResult<f64> {
        at_boundary(self.average_items_inner(kind, programs, languages))
    }

    fn average_items_inner(
        &self,
        kind: ItemKind,
        programs: &[String],
        languages: &[String],
    ) -> Result<f64> {
        let files = self.corpus.select_files(programs, languages)?;
        info!("averaging {}s over {} document(s)", kind, files.len());
        let counter = aggregator::corpus_frequency(kind, &files)?;
        let items = match kind {
            ItemKind::Token => counter.total(),
            ItemKind::Type => counter.len() as u64,
        };
        ratio(items, files.len() as u64, "average item count")
    }

    pub fn average_sentences(&self, programs: &[String], languages: &[String]) -> QueryResult<f64> {
        at_boundary(self.average_sentences_inner(programs, languages))
    }

    fn average_sentences_inner(&self, programs: &[String], languages: &[String]) -> Result<f64> {
        let files = self.corpus.select_files(programs, languages)?;
        info!("averaging sentences over {} document(s)", files.len());
        let maps = aggregator::per_document_sentence_maps(&files)?;
        let sentences: u64 = maps.iter().map(|(_, lengths)| lengths.len() as u64).sum();
        ratio(sentences, maps.len() as u64, "average sentence count")
    }

    /// Distinct types divided by total tokens.
    pub fn type_token_ratio(&self, programs: &[String], languages: &[String]) -> QueryResult<f64> {
        at_boundary(self.type_token_ratio_inner(programs, languages))
    }

    fn type_token_ratio_inner(&self, programs: &[String], languages: &[String]) -> Result<f64> {
        let files = self.corpus.select_files(programs, languages)?;
        info!("type-token ratio over {} document(s)", files.len());
        let types = aggregator::corpus_frequency(ItemKind::Type, &files)?;
        let tokens = aggregator::corpus_frequency(ItemKind::Token, &files)?;
        if !files.is_empty() && tokens.total() == 0 {
            return Err(CorpusError::NoWordTokens {
                quantity: "type-token ratio",
            });
        }
        ratio(types.len() as u64, tokens.total(), "type-token ratio")
    }

    /// Longest sentences by word count. Whole length buckets are emitted until
    /// at least `rank` sentences are out, so ties at the last length may push
    /// the result past `rank`.
    pub fn longest_sentences(
        &self,
        rank: usize,
        programs: &[String],
        languages: &[String],
    ) -> QueryResult<Vec<LongSentence>> {
        at_boundary(self.longest_sentences_inner(rank, programs, languages))
    }

    fn longest_sentences_inner(
        &self,
        rank: usize,
        programs: &[String],
        languages: &[String],
    ) -> Result<Vec<LongSentence>> {
        let files = self.corpus.select_files(programs, languages)?;
        info!("ranking sentences over {} document(s)", files.len());
        let maps = aggregator::per_document_sentence_maps(&files)?;

        let mut buckets: BTreeMap<u64, Vec<(&Path, &str)>> = BTreeMap::new();
        for (path, lengths) in maps.iter() {
            for (sent_id, length) in lengths.iter() {
                buckets.entry(length).or_default().push((path, sent_id));
            }
        }

        let mut emitted = 0usize;
        let mut sentences = Vec::new();
        let mut loaded: Option<NafDocument> = None;
        for (&length, pairs) in buckets.iter().rev() {
            if emitted >= rank {
                break;
            }
            emitted += pairs.len();
            for &(path, sent_id) in pairs {
                let doc = match loaded.take() {
                    Some(doc) if doc.path() == path => doc,
                    _ => NafDocument::load(path)?,
                };
                sentences.push(LongSentence {
                    rank: emitted,
                    length,
                    source: path.to_path_buf(),
                    sentence_id: sent_id.to_string(),
                    text: extractor::sentence_text(&doc, sent_id),
                });
                loaded = Some(doc);
            }
        }
        Ok(sentences)
    }

    /// Entity counts, optionally restricted to one entity kind.
    pub fn entity_frequency(
        &self,
        kind: Option<EntityKind>,
        programs: &[String],
        languages: &[String],
    ) -> QueryResult<FrequencyCounter> {
        at_boundary(self.corpus.select_files(programs, languages).and_then(|files| {
            info!("counting entities over {} document(s)", files.len());
            let marker = kind.map(|k| k.marker(&self.entities));
            aggregator::entity_frequency(&files, marker)
        }))
    }

    /// The `rank` most frequent entities of one kind.
    pub fn most_common_entities(
        &self,
        kind: EntityKind,
        rank: usize,
        programs: &[String],
        languages: &[String],
    ) -> QueryResult<Vec<RankedItem>> {
        Ok(match self.entity_frequency(Some(kind), programs, languages)? {
            Outcome::Answer(counter) => Outcome::Answer(rank_items(&counter, rank)),
            Outcome::Rejected(e) => Outcome::Rejected(e),
        })
    }
}

/// The top `n` entries of a counter, ranked from 1.
pub fn rank_items(counter: &FrequencyCounter, n: usize) -> Vec<RankedItem> {
    counter
        .most_common(n)
        .into_iter()
        .enumerate()
        .map(|(i, (item, frequency))| RankedItem {
            rank: i + 1,
            item: item.to_string(),
            frequency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_rejects_empty_denominator() {
        assert_eq!(ratio(3, 4, "x").unwrap(), 0.75);
        assert!(matches!(
            ratio(0, 0, "x"),
            Err(CorpusError::EmptyCorpus { quantity: "x" })
        ));
    }

    #[test]
    fn boundary_splits_recoverable_from_fatal() {
        let rejected: QueryResult<u8> =
            at_boundary(Err(InvalidArgument::InvalidRank("x".into()).into()));
        assert!(rejected.unwrap().is_rejected());

        let fatal: QueryResult<u8> = at_boundary(Err(CorpusError::EmptyCorpus { quantity: "x" }));
        assert!(fatal.is_err());

        let answered: QueryResult<u8> = at_boundary(Ok(7));
        assert_eq!(answered.unwrap().answer(), Some(7));
    }

    #[test]
    fn unparsable_argument_never_runs_the_query() {
        let outcome: QueryResult<u8> = with_arg(
            "lemma".parse::<ItemKind>(),
            |_| panic!("query must not run"),
        );
        assert_eq!(
            outcome.unwrap(),
            Outcome::Rejected(InvalidArgument::UnknownKind("lemma".into()))
        );

        let ran: QueryResult<usize> = with_arg(crate::models::parse_rank("4"), |n| Ok(Outcome::Answer(n * 2)));
        assert_eq!(ran.unwrap().answer(), Some(8));
    }

    #[test]
    fn entity_ranks_start_at_one() {
        let counter: FrequencyCounter = ["amsterdam", "john smith", "amsterdam"].into_iter().collect();
        let ranked = rank_items(&counter, 5);
        assert_eq!(
            ranked,
            vec![
                RankedItem {
                    rank: 1,
                    item: "amsterdam".into(),
                    frequency: 2
                },
                RankedItem {
                    rank: 2,
                    item: "john smith".into(),
                    frequency: 1
                },
            ]
        );
    }
}
