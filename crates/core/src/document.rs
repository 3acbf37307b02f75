//! In-memory view of one NAF document, parsed fresh on every load.
//!
//! Only the layers the statistics need are kept: `/NAF/text/wf`,
//! `/NAF/terms/term` and `/NAF/entities/entity` with its
//! `references/span/target` children. Everything else is skipped.

use crate::error::{CorpusError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const WF: &[&str] = &["NAF", "text", "wf"];
const TERM: &[&str] = &["NAF", "terms", "term"];
const ENTITY: &[&str] = &["NAF", "entities", "entity"];
const TARGET: &[&str] = &["NAF", "entities", "entity", "references", "span", "target"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordForm {
    pub text: String,
    pub sent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: String,
    pub lemma: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Value of the `type` attribute, e.g. `DBpedia:Person`.
    pub kind: String,
    /// Term ids referenced by the entity's spans, in document order.
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NafDocument {
    path: PathBuf,
    word_forms: Vec<WordForm>,
    terms: Vec<Term>,
    entities: Vec<Entity>,
}

impl NafDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        Self::parse(&mut reader, path)
    }

    /// Parses a document held in memory; `path` is only used in error messages.
    pub fn from_xml(xml: &str, path: &Path) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        Self::parse(&mut reader, path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn word_forms(&self) -> &[WordForm] {
        &self.word_forms
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn parse<R: BufRead>(reader: &mut Reader<R>, path: &Path) -> Result<Self> {
        let xml_err = |source| CorpusError::Xml {
            path: path.to_path_buf(),
            source,
        };

        let mut doc = NafDocument {
            path: path.to_path_buf(),
            ..Default::default()
        };
        let mut stack: Vec<String> = Vec::new();
        let mut open_wf: Option<WordForm> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf).map_err(xml_err)? {
                Event::Start(e) => {
                    stack.push(local_name(&e));
                    doc.open(&stack, &e, &mut open_wf)?;
                }
                Event::Empty(e) => {
                    stack.push(local_name(&e));
                    doc.open(&stack, &e, &mut open_wf)?;
                    doc.close(&stack, &mut open_wf);
                    stack.pop();
                }
                Event::End(_) => {
                    doc.close(&stack, &mut open_wf);
                    stack.pop();
                }
                Event::Text(t) => {
                    if let Some(wf) = open_wf.as_mut() {
                        wf.text.push_str(&t.unescape().map_err(xml_err)?);
                    }
                }
                Event::CData(c) => {
                    if let Some(wf) = open_wf.as_mut() {
                        wf.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = stack.last() {
            return Err(xml_err(quick_xml::Error::UnexpectedEof(format!(
                "unclosed <{}>",
                unclosed
            ))));
        }
        Ok(doc)
    }

    fn open(
        &mut self,
        stack: &[String],
        e: &BytesStart<'_>,
        open_wf: &mut Option<WordForm>,
    ) -> Result<()> {
        if at(stack, WF) {
            let sent = self.required(e, "wf", "sent")?;
            *open_wf = Some(WordForm {
                text: String::new(),
                sent,
            });
        } else if at(stack, TERM) {
            let id = self.required(e, "term", "id")?;
            let lemma = self.required(e, "term", "lemma")?;
            self.terms.push(Term { id, lemma });
        } else if at(stack, ENTITY) {
            let kind = self.attr(e, "type")?.unwrap_or_default();
            self.entities.push(Entity {
                kind,
                targets: Vec::new(),
            });
        } else if at(stack, TARGET) {
            let id = self.required(e, "target", "id")?;
            if let Some(entity) = self.entities.last_mut() {
                entity.targets.push(id);
            }
        }
        Ok(())
    }

    fn close(&mut self, stack: &[String], open_wf: &mut Option<WordForm>) {
        if at(stack, WF) {
            if let Some(wf) = open_wf.take() {
                self.word_forms.push(wf);
            }
        }
    }

    fn attr(&self, e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
        let xml_err = |source| CorpusError::Xml {
            path: self.path.clone(),
            source,
        };
        match e.try_get_attribute(name).map_err(xml_err)? {
            Some(a) => Ok(Some(a.unescape_value().map_err(xml_err)?.into_owned())),
            None => Ok(None),
        }
    }

    fn required(
        &self,
        e: &BytesStart<'_>,
        element: &'static str,
        attribute: &'static str,
    ) -> Result<String> {
        self.attr(e, attribute)?
            .ok_or_else(|| CorpusError::MissingAttribute {
                path: self.path.clone(),
                element,
                attribute,
            })
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn at(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a == b)
}
