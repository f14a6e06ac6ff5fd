use crate::core::context::Context;
use crate::core::interfaces::StyleBackend;
use crate::core::models::*;
use crate::core::passes::Pass;
use crate::utils::{JstyleError, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ENV_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$env\.([A-Za-z_][A-Za-z0-9_-]*)").unwrap());

pub const DEFAULT_BASE_CHUNK_FILE: &str = "base.css";

/// Built-in style compilation backend over the inline rule model. Bundling
/// resolves `require`d shared modules transitively, each module included
/// once, dependencies first.
pub struct RuleBackend {
    modules: IndexMap<String, EntrySource>,
}

impl RuleBackend {
    pub fn new(modules: IndexMap<String, EntrySource>) -> Self {
        Self { modules }
    }

    fn collect_rules(
        &self,
        source: &EntrySource,
        visited: &mut HashSet<String>,
        out: &mut Vec<Rule>,
    ) -> Result<()> {
        for name in &source.require {
            if !visited.insert(name.clone()) {
                continue;
            }
            let module = self.modules.get(name).ok_or_else(|| {
                JstyleError::build(format!("unknown module in require: {}", name))
            })?;
            self.collect_rules(module, visited, out)?;
        }
        out.extend(source.rules.iter().cloned());
        Ok(())
    }

    fn substitute_env(&self, rules: &mut [Rule], env: &Environment) -> Result<()> {
        for rule in rules.iter_mut() {
            for (_, value) in rule.declarations.iter_mut() {
                if !value.contains("$env.") {
                    continue;
                }
                let mut missing = None;
                let substituted = ENV_REGEX.replace_all(value, |caps: &regex::Captures| {
                    match env.get(&caps[1]) {
                        Some(resolved) => resolved.clone(),
                        None => {
                            missing.get_or_insert_with(|| caps[1].to_string());
                            String::new()
                        }
                    }
                });
                if let Some(key) = missing {
                    return Err(JstyleError::build(format!(
                        "undefined env value: $env.{}",
                        key
                    )));
                }
                *value = substituted.into_owned();
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StyleBackend for RuleBackend {
    fn bundle(&self, entry: &EntrySource, ctx: &mut Context) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();
        let mut visited = HashSet::new();
        self.collect_rules(entry, &mut visited, &mut rules)?;
        self.substitute_env(&mut rules, &ctx.env)?;
        Ok(rules)
    }

    fn emit_css(&self, rule: &Rule) -> String {
        let declarations: Vec<String> = rule
            .declarations
            .iter()
            .map(|(name, value)| format!("  {}: {};", name, value))
            .collect();
        format!(
            "{} {{\n{}\n}}",
            rule.selectors.join(", "),
            declarations.join("\n")
        )
    }

    /// Whole-chunk compilation: bundle every chunk, hoist rules shared by
    /// two or more chunks into the base chunk, then run the supplied pass
    /// pipeline and emit. The base chunk comes first in the artifact so the
    /// registries see shared rules before chunk-local ones.
    async fn compile(
        &self,
        chunks: &ChunkSet,
        ctx: &mut Context,
        passes: &[Pass],
        base_chunk_file_name: Option<&str>,
    ) -> Result<Artifact> {
        let mut bundled: Vec<(String, Vec<Rule>)> = Vec::with_capacity(chunks.len());
        for (file_name, source) in chunks {
            bundled.push((file_name.clone(), self.bundle(source, ctx)?));
        }

        // A rule appearing in more than one chunk moves to the base chunk,
        // in first-appearance order.
        let mut base_rules: Vec<Rule> = Vec::new();
        for (i, (_, rules)) in bundled.iter().enumerate() {
            for rule in rules {
                let shared = bundled
                    .iter()
                    .skip(i + 1)
                    .any(|(_, other)| other.contains(rule));
                if shared && !base_rules.contains(rule) {
                    base_rules.push(rule.clone());
                }
            }
        }
        for (_, rules) in bundled.iter_mut() {
            rules.retain(|rule| !base_rules.contains(rule));
        }

        let mut ordered: Vec<(String, Vec<Rule>)> = Vec::new();
        if !base_rules.is_empty() {
            let base_name = base_chunk_file_name.unwrap_or(DEFAULT_BASE_CHUNK_FILE);
            ordered.push((base_name.to_string(), base_rules));
        }
        ordered.extend(bundled);

        let mut artifact = Artifact::default();
        for (file_name, mut rules) in ordered {
            for pass in passes {
                rules = rules
                    .into_iter()
                    .filter_map(|rule| pass.apply(rule, ctx))
                    .collect();
            }
            let content: String = rules
                .iter()
                .map(|rule| self.emit_css(rule))
                .collect::<Vec<_>>()
                .join("\n");
            artifact.chunks.push(CompiledEntry::new(file_name, content));
        }
        Ok(artifact)
    }
}
