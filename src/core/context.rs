use crate::core::models::{BuildConfig, Environment};
use indexmap::IndexMap;

/// Per-build state: an immutable snapshot of the minification options plus
/// the two mutable name registries. Exclusively owned by one compiler for
/// the lifetime of one build; never shared across builds.
#[derive(Debug, Default)]
pub struct Context {
    pub minify_tag_names: bool,
    pub minify_class_names: bool,
    pub tag_name_prefix: Option<String>,
    pub env: Environment,
    tag_name_registry: IndexMap<String, String>,
    class_name_registry: IndexMap<String, String>,
}

impl Context {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            minify_tag_names: config.minify_tag_names.is_enabled(),
            minify_class_names: config.minify_class_names.is_enabled(),
            tag_name_prefix: config.tag_name_prefix.clone(),
            env: config.env.clone(),
            tag_name_registry: IndexMap::new(),
            class_name_registry: IndexMap::new(),
        }
    }

    /// Minified name for a tag, assigning the next short name on first
    /// sight. Append-only: a name, once assigned, is never changed.
    pub fn minified_tag_name(&mut self, original: &str) -> String {
        let next = short_name(self.tag_name_registry.len());
        let prefix = self.tag_name_prefix.as_deref().unwrap_or("");
        self.tag_name_registry
            .entry(original.to_string())
            .or_insert_with(|| format!("{}{}", prefix, next))
            .clone()
    }

    /// Minified name for a class, first-seen-wins as for tags.
    pub fn minified_class_name(&mut self, original: &str) -> String {
        let next = short_name(self.class_name_registry.len());
        self.class_name_registry
            .entry(original.to_string())
            .or_insert(next)
            .clone()
    }

    pub fn tag_name_registry(&self) -> &IndexMap<String, String> {
        &self.tag_name_registry
    }

    pub fn class_name_registry(&self) -> &IndexMap<String, String> {
        &self.class_name_registry
    }
}

const HEAD_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const TAIL_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Deterministic short identifier for a registry index: one of 52 letters
/// first, base-62 tail characters after. Collision-free within a build
/// because indices are unique.
fn short_name(index: usize) -> String {
    let mut name = String::new();
    name.push(HEAD_CHARS[index % HEAD_CHARS.len()] as char);
    let mut rest = index / HEAD_CHARS.len();
    while rest > 0 {
        rest -= 1;
        name.push(TAIL_CHARS[rest % TAIL_CHARS.len()] as char);
        rest /= TAIL_CHARS.len();
    }
    name
}
