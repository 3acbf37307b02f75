use std::fs;
use std::path::{Path, PathBuf};

use naf_core::config::CorpusConfig;
use naf_core::query::Analyzer;
use naf_core::scanner::Corpus;

/// Builds a NAF document: one `wf`/`term` pair per word, sentence ids counted
/// from 1, term ids `t1..tn` in document order with the lowercased word as lemma.
pub fn naf(sentences: &[&[&str]], entities: &[(&str, &[&str])]) -> String {
    let mut text = String::new();
    let mut terms = String::new();
    let mut n = 0;
    for (s, words) in sentences.iter().enumerate() {
        for word in words.iter() {
            n += 1;
            text.push_str(&format!(
                "    <wf id=\"w{n}\" sent=\"{}\">{}</wf>\n",
                s + 1,
                escape(word)
            ));
            terms.push_str(&format!(
                "    <term id=\"t{n}\" lemma=\"{}\"><span><target id=\"w{n}\"/></span></term>\n",
                escape(&word.to_lowercase())
            ));
        }
    }
    let mut ents = String::new();
    for (i, (kind, targets)) in entities.iter().enumerate() {
        ents.push_str(&format!(
            "    <entity id=\"e{}\" type=\"{}\">\n      <references><span>",
            i + 1,
            kind
        ));
        for t in targets.iter() {
            ents.push_str(&format!("<target id=\"{t}\"/>"));
        }
        ents.push_str("</span></references>\n    </entity>\n");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<NAF xml:lang=\"en\">\n  <text>\n{text}  </text>\n  <terms>\n{terms}  </terms>\n  <entities>\n{ents}  </entities>\n</NAF>\n"
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('"', "&quot;")
}

pub fn write(root: &Path, program: &str, language: &str, name: &str, xml: &str) -> PathBuf {
    let dir = root.join(program).join(language);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, xml).unwrap();
    path
}

pub fn analyzer(root: &Path) -> Analyzer {
    let cfg = CorpusConfig {
        root: root.to_string_lossy().into_owned(),
        ..CorpusConfig::default()
    };
    Analyzer::new(Corpus::from_config(&cfg).unwrap(), Default::default())
}

pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// `n` distinct words, used to build sentences of a known length.
pub fn words(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}{}", letters(i))).collect()
}

fn letters(mut i: usize) -> String {
    let mut s = String::new();
    loop {
        s.insert(0, (b'a' + (i % 26) as u8) as char);
        i /= 26;
        if i == 0 {
            break;
        }
    }
    s
}
