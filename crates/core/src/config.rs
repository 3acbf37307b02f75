use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRAMS: [&str; 16] = [
    "arch", "ciw", "erf", "esmus", "fil", "ges", "kcw", "ltk", "ohs", "ph", "rgs", "rkcw", "rltk",
    "rohs", "rtlw", "tlw",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub corpus: CorpusConfig,
    pub entities: EntityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding `<program>/<language>/` subtrees.
    pub root: String,
    /// File-name glob selecting the annotation variant to analyse.
    pub document_glob: String,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Closed vocabulary of program codes accepted by the selector.
    pub programs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    pub person_marker: String,
    pub place_marker: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: "thesis_vu_2015".to_string(),
            document_glob: "*nohyphen".to_string(),
            exclude: Vec::new(),
            programs: DEFAULT_PROGRAMS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            person_marker: "DBpedia:Person".to_string(),
            place_marker: "DBpedia:Place".to_string(),
        }
    }
}

/// Loads defaults, then the given TOML file (or `config/default` if present),
/// then `NAF_`-prefixed environment overrides such as `NAF_CORPUS__ROOT`.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();
    let mut settings = config::Config::builder()
        .set_default("corpus.root", defaults.corpus.root)?
        .set_default("corpus.document_glob", defaults.corpus.document_glob)?
        .set_default("corpus.exclude", Vec::<String>::new())?
        .set_default("corpus.programs", defaults.corpus.programs)?
        .set_default("entities.person_marker", defaults.entities.person_marker)?
        .set_default("entities.place_marker", defaults.entities.place_marker)?;
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("NAF")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("corpus.programs")
            .with_list_parse_key("corpus.exclude")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
