use crate::core::models::*;
use crate::utils::{JstyleError, Logger, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Raw shape of the config file (jstyle.conf.json), before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    #[serde(default)]
    chunks: Option<ChunkSet>,
    #[serde(default)]
    entries: Option<EntryMap>,
    #[serde(default)]
    modules: IndexMap<String, EntrySource>,
    #[serde(default)]
    env: Environment,
    #[serde(default)]
    minify_tag_names: MinifyNames,
    #[serde(default)]
    minify_class_names: MinifyNames,
    #[serde(default)]
    tag_name_prefix: Option<String>,
    #[serde(default)]
    base_chunk_file_name: Option<String>,
}

/// Loads the build description: read the config text, substitute `${key}`
/// placeholders from the `-d` definitions, parse, normalize.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse repeated `key=value` definition arguments.
    pub fn parse_definitions(defines: &[String]) -> Result<Definitions> {
        let mut definitions = Definitions::new();
        for define in defines {
            let (key, value) = define.split_once('=').ok_or_else(|| {
                JstyleError::config(format!("invalid define (expected key=value): {}", define))
            })?;
            definitions.insert(key.to_string(), value.to_string());
        }
        Ok(definitions)
    }

    pub fn load(path: &Path, definitions: &Definitions) -> Result<BuildConfig> {
        Logger::debug(&format!("Loading config from {}", path.display()));

        let raw = std::fs::read_to_string(path).map_err(JstyleError::Io)?;
        let substituted = Self::substitute(&raw, definitions)?;
        let file: ConfigFile = serde_json::from_str(&substituted).map_err(|e| {
            JstyleError::config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Self::normalize(file)
    }

    /// Replace every `${key}` occurrence in the raw config text. The
    /// parameterized-config contract: an undefined key is a configuration
    /// error, never silently left in place.
    fn substitute(raw: &str, definitions: &Definitions) -> Result<String> {
        let mut missing = None;
        let substituted = PLACEHOLDER_REGEX.replace_all(raw, |caps: &regex::Captures| {
            match definitions.get(&caps[1]) {
                Some(value) => value.clone(),
                None => {
                    missing.get_or_insert_with(|| caps[1].to_string());
                    String::new()
                }
            }
        });
        match missing {
            Some(key) => Err(JstyleError::config(format!(
                "undefined config variable: ${{{}}} (pass -d {}=...)",
                key, key
            ))),
            None => Ok(substituted.into_owned()),
        }
    }

    fn normalize(file: ConfigFile) -> Result<BuildConfig> {
        // The two build modes are mutually exclusive; a config supplying
        // both is rejected up front instead of silently picking one.
        if file.chunks.is_some() && file.entries.is_some() {
            return Err(JstyleError::config(
                "config supplies both \"chunks\" and \"entries\"; exactly one build mode is allowed",
            ));
        }
        Ok(BuildConfig {
            chunks: file.chunks,
            entries: file.entries,
            modules: file.modules,
            env: file.env,
            minify_tag_names: file.minify_tag_names,
            minify_class_names: file.minify_class_names,
            tag_name_prefix: file.tag_name_prefix,
            base_chunk_file_name: file.base_chunk_file_name,
        })
    }
}
