//! Selects corpus documents by program and language.

use crate::config::CorpusConfig;
use crate::error::{CorpusError, InvalidArgument, Result};
use crate::models::Language;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A corpus root laid out as `<root>/<program>/<language>/**`, together with
/// the vocabulary of programs it accepts.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    programs: Vec<String>,
    documents: GlobSet,
    excludes: GlobSet,
}

impl Corpus {
    pub fn from_config(cfg: &CorpusConfig) -> Result<Self> {
        if cfg.programs.is_empty() {
            return Err(CorpusError::Config(
                "corpus.programs must name at least one program".to_string(),
            ));
        }
        Ok(Self {
            root: PathBuf::from(&cfg.root),
            programs: cfg.programs.clone(),
            documents: build_globset(std::slice::from_ref(&cfg.document_glob))?,
            excludes: build_globset(&cfg.exclude)?,
        })
    }

    /// Checks every tag up front, then walks each program/language pair of the
    /// cross product in input order and collects matching document paths.
    pub fn select_files(&self, programs: &[String], languages: &[String]) -> Result<Vec<PathBuf>> {
        self.validate(programs, languages)?;

        let mut files = Vec::new();
        for prog in programs {
            for lang in languages {
                let dir = self.root.join(prog).join(lang);
                let before = files.len();
                self.walk(&dir, &mut files);
                debug!(
                    "{}/{}: {} document(s) under {:?}",
                    prog,
                    lang,
                    files.len() - before,
                    dir
                );
            }
        }
        Ok(files)
    }

    fn validate(&self, programs: &[String], languages: &[String]) -> Result<()> {
        let unknown: Vec<String> = programs
            .iter()
            .filter(|p| !self.programs.contains(*p))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(InvalidArgument::UnknownProgram {
                unknown,
                known: self.programs.clone(),
            }
            .into());
        }

        let unsupported: Vec<String> = languages
            .iter()
            .filter(|l| l.parse::<Language>().is_err())
            .cloned()
            .collect();
        if !unsupported.is_empty() {
            return Err(InvalidArgument::UnsupportedLanguage(unsupported).into());
        }
        Ok(())
    }

    fn walk(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        for entry in WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_excluded(e.path(), &self.excludes))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    // A program/language pair without a directory simply has no documents.
                    if err.depth() > 0 {
                        warn!("skipping unreadable entry: {}", err);
                    }
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if self.documents.is_match(entry.file_name()) {
                files.push(entry.into_path());
            }
        }
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).map_err(|e| CorpusError::Config(e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| CorpusError::Config(e.to_string()))
}

fn is_excluded(path: &Path, excludes: &GlobSet) -> bool {
    excludes.is_match(path)
        || path
            .file_name()
            .map(|name| excludes.is_match(name))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn corpus_at(root: &Path) -> Corpus {
        let cfg = CorpusConfig {
            root: root.to_string_lossy().into_owned(),
            ..CorpusConfig::default()
        };
        Corpus::from_config(&cfg).unwrap()
    }

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn collects_only_suffixed_files_recursively() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("arch").join("en");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("a.naf.nohyphen"), "").unwrap();
        fs::write(dir.join("a.naf"), "").unwrap();
        fs::write(dir.join("nested").join("b.naf.nohyphen"), "").unwrap();

        let files = corpus_at(temp.path())
            .select_files(&strings(&["arch"]), &strings(&["en"]))
            .unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.to_string_lossy().ends_with("nohyphen")));
    }

    #[test]
    fn repeated_tags_select_documents_again() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("arch").join("en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("a.naf.nohyphen"), "").unwrap();
        fs::write(dir.join("b.naf.nohyphen"), "").unwrap();

        let corpus = corpus_at(temp.path());
        let once = corpus
            .select_files(&strings(&["arch"]), &strings(&["en"]))
            .unwrap();
        let twice = corpus
            .select_files(&strings(&["arch", "arch"]), &strings(&["en"]))
            .unwrap();
        assert_eq!(once.len(), 2);
        assert_eq!(twice.len(), 4);
        assert_eq!(twice[..2], once[..]);
        assert_eq!(twice[2..], once[..]);
    }

    #[test]
    fn missing_pair_directory_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let files = corpus_at(temp.path())
            .select_files(&strings(&["tlw"]), &strings(&["nl"]))
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn validation_reports_all_unknown_programs_before_walking() {
        let temp = tempfile::tempdir().unwrap();
        let err = corpus_at(temp.path())
            .select_files(&strings(&["xyz", "arch", "abc"]), &strings(&["de"]))
            .unwrap_err();
        match err {
            CorpusError::InvalidArgument(InvalidArgument::UnknownProgram { unknown, .. }) => {
                assert_eq!(unknown, strings(&["xyz", "abc"]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unsupported_languages_are_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let err = corpus_at(temp.path())
            .select_files(&strings(&["arch"]), &strings(&["en", "fr", "de"]))
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            CorpusError::InvalidArgument(InvalidArgument::UnsupportedLanguage(ref l)) if l == &strings(&["fr", "de"])
        ));
    }

    #[test]
    fn excludes_prune_the_walk() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("ph").join("nl");
        fs::create_dir_all(dir.join("drafts")).unwrap();
        fs::write(dir.join("keep.nohyphen"), "").unwrap();
        fs::write(dir.join("drafts").join("skip.nohyphen"), "").unwrap();

        let cfg = CorpusConfig {
            root: temp.path().to_string_lossy().into_owned(),
            exclude: strings(&["drafts"]),
            ..CorpusConfig::default()
        };
        let files = Corpus::from_config(&cfg)
            .unwrap()
            .select_files(&strings(&["ph"]), &strings(&["nl"]))
            .unwrap();
        assert_eq!(files, vec![dir.join("keep.nohyphen")]);
    }

    #[test]
    fn empty_vocabulary_is_a_config_error() {
        let cfg = CorpusConfig {
            programs: Vec::new(),
            ..CorpusConfig::default()
        };
        assert!(matches!(
            Corpus::from_config(&cfg),
            Err(CorpusError::Config(_))
        ));
    }
}
