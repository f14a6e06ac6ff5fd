use crate::core::context::Context;
use crate::core::models::Rule;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Tag names start a compound selector: string start or after a combinator.
static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[\s,>+~])([a-zA-Z][a-zA-Z0-9-]*)").unwrap());

static CLASS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.([a-zA-Z_][\w-]*)").unwrap());

/// One transformation step over a single rule. Passes are applied
/// pass-major: a pass visits every surviving rule before the next pass
/// starts. Returning `None` drops the rule from the surviving set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Resolve duplicate declaration names inside one rule; the last
    /// occurrence wins.
    FlattenProperties,
    /// Rewrite tag and class selectors through the context registries,
    /// when the corresponding option is enabled.
    MinifyIdentifiers,
    /// Drop rules left without declarations.
    CleanEmptyRules,
}

impl Pass {
    pub fn apply(self, rule: Rule, ctx: &mut Context) -> Option<Rule> {
        match self {
            Pass::FlattenProperties => Some(flatten_properties(rule)),
            Pass::MinifyIdentifiers => Some(minify_identifiers(rule, ctx)),
            Pass::CleanEmptyRules => {
                if rule.declarations.is_empty() {
                    None
                } else {
                    Some(rule)
                }
            }
        }
    }
}

fn flatten_properties(mut rule: Rule) -> Rule {
    let mut seen = std::collections::HashSet::new();
    let mut kept: Vec<(String, String)> = rule
        .declarations
        .into_iter()
        .rev()
        .filter(|(name, _)| seen.insert(name.clone()))
        .collect();
    kept.reverse();
    rule.declarations = kept;
    rule
}

fn minify_identifiers(mut rule: Rule, ctx: &mut Context) -> Rule {
    if !ctx.minify_tag_names && !ctx.minify_class_names {
        return rule;
    }
    rule.selectors = rule
        .selectors
        .iter()
        .map(|selector| {
            let mut rewritten = selector.clone();
            if ctx.minify_tag_names {
                rewritten = TAG_REGEX
                    .replace_all(&rewritten, |caps: &Captures| {
                        format!("{}{}", &caps[1], ctx.minified_tag_name(&caps[2]))
                    })
                    .into_owned();
            }
            if ctx.minify_class_names {
                rewritten = CLASS_REGEX
                    .replace_all(&rewritten, |caps: &Captures| {
                        format!(".{}", ctx.minified_class_name(&caps[1]))
                    })
                    .into_owned();
            }
            rewritten
        })
        .collect();
    rule
}
