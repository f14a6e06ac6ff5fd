use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// `-d key=value` definitions collected from the command line.
pub type Definitions = IndexMap<String, String>;

/// Environment values visible to entry sources through `$env.key`.
pub type Environment = IndexMap<String, String>;

/// Output file name -> source, in chunk emission order.
pub type ChunkSet = IndexMap<String, EntrySource>;

/// Output file name -> source, in entry iteration order. The order is
/// significant: it drives both output order and first-seen registry
/// population.
pub type EntryMap = IndexMap<String, EntrySource>;

/// One style rule: a selector group and its declarations. Declarations are
/// a list, not a map, because duplicate names are legal input and are
/// resolved by the flatten pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub selectors: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<(String, String)>,
}

/// A named source unit: its own rules plus the shared modules it pulls in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrySource {
    #[serde(default)]
    pub require: Vec<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Tri-state minification switch: disabled, enabled with the default
/// registry file name, or enabled with a custom one. In the config file it
/// is written as `true`, `false` or a file name string.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MinifyNames {
    #[default]
    Disabled,
    Enabled,
    File(String),
}

impl MinifyNames {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, MinifyNames::Disabled)
    }

    /// Registry output file name, or None when minification is disabled.
    pub fn file_name<'a>(&'a self, default: &'a str) -> Option<&'a str> {
        match self {
            MinifyNames::Disabled => None,
            MinifyNames::Enabled => Some(default),
            MinifyNames::File(name) => Some(name),
        }
    }
}

impl<'de> Deserialize<'de> for MinifyNames {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            File(String),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Flag(false) => MinifyNames::Disabled,
            Repr::Flag(true) => MinifyNames::Enabled,
            Repr::File(name) => MinifyNames::File(name),
        })
    }
}

/// Normalized build description consumed by the compiler. Exactly one of
/// `chunks`/`entries` selects the build mode; neither present is a
/// successful no-op. The config loader rejects configs supplying both.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub chunks: Option<ChunkSet>,
    pub entries: Option<EntryMap>,
    pub modules: IndexMap<String, EntrySource>,
    pub env: Environment,
    pub minify_tag_names: MinifyNames,
    pub minify_class_names: MinifyNames,
    pub tag_name_prefix: Option<String>,
    pub base_chunk_file_name: Option<String>,
}

/// Transient compiled output unit, consumed by the emission sequencer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledEntry {
    pub file_name: String,
    pub content: String,
}

impl CompiledEntry {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Result of a whole-chunk backend compilation, in emission order.
#[derive(Debug, Default)]
pub struct Artifact {
    pub chunks: Vec<CompiledEntry>,
}
