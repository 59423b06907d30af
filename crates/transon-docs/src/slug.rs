//! Deterministic identifiers for examples.
//!
//! A slug is `<rule>-<example>` for rule-scoped examples and
//! `<rule>-<param>-<example>` for parameter-scoped ones. Slugs key the selection and
//! double as DOM ids for the example toggles, so they are recomputed on every render
//! and must not depend on anything but the example's position.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::docs::{DocumentationTree, ExampleRecord, ParameterNode, RuleNode};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(Rc<str>);

impl Slug {
    pub fn new(slug: impl Into<Rc<str>>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

impl From<String> for Slug {
    fn from(slug: String) -> Self {
        Self::new(slug)
    }
}

/// Prefix shared by all examples of one scope: `rule` or `rule-param`.
pub fn scope_prefix(rule: &str, param: Option<&str>) -> String {
    match param {
        Some(param) => format!("{rule}-{param}"),
        None => rule.to_owned(),
    }
}

pub fn slug_for(rule: &str, param: Option<&str>, example: &str) -> Slug {
    Slug::from(format!("{}-{example}", scope_prefix(rule, param)))
}

/// Position of an example inside the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExampleLocation {
    pub rule: usize,
    /// `None` for examples attached to the rule itself.
    pub param: Option<usize>,
    pub example: usize,
}

impl ExampleLocation {
    pub fn resolve<'tree>(&self, tree: &'tree DocumentationTree) -> Option<&'tree ExampleRecord> {
        let rule = tree.rules.get(self.rule)?;
        let examples = match self.param {
            Some(param) => &rule.params.get(param)?.examples,
            None => &rule.examples,
        };
        examples.get(self.example)
    }
}

/// Every example slug of a tree, in document order.
///
/// Order: a rule's own examples, then each parameter's examples, rule by rule.
#[derive(Debug, Default)]
pub struct SlugIndex {
    entries: Vec<(Slug, ExampleLocation)>,
    first_by_slug: HashMap<Slug, usize>,
}

impl SlugIndex {
    pub fn build(tree: &DocumentationTree) -> Self {
        let mut index = Self::default();
        for (rule_position, rule) in tree.rules.iter().enumerate() {
            index.push_scope(rule, None, &rule.examples, rule_position);
            for (param_position, param) in rule.params.iter().enumerate() {
                index.push_scope(rule, Some((param_position, param)), &param.examples, rule_position);
            }
        }
        index
    }

    fn push_scope(
        &mut self,
        rule: &RuleNode,
        param: Option<(usize, &ParameterNode)>,
        examples: &[ExampleRecord],
        rule_position: usize,
    ) {
        let param_name = param.map(|(_, param)| param.name.as_str());
        for (example_position, example) in examples.iter().enumerate() {
            let slug = slug_for(&rule.name, param_name, &example.name);
            let location = ExampleLocation {
                rule: rule_position,
                param: param.map(|(position, _)| position),
                example: example_position,
            };
            self.first_by_slug
                .entry(slug.clone())
                .or_insert(self.entries.len());
            self.entries.push((slug, location));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Slug, ExampleLocation)> {
        self.entries.iter()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &Slug> {
        self.entries.iter().map(|(slug, _)| slug)
    }

    /// Location of the first example carrying `slug`.
    pub fn locate(&self, slug: &Slug) -> Option<ExampleLocation> {
        self.first_by_slug
            .get(slug)
            .map(|position| self.entries[*position].1)
    }

    pub fn get<'tree>(
        &self,
        tree: &'tree DocumentationTree,
        slug: &Slug,
    ) -> Option<&'tree ExampleRecord> {
        self.locate(slug)?.resolve(tree)
    }

    /// Slugs shared by more than one example, each reported once, in document order.
    pub fn duplicates(&self) -> Vec<Slug> {
        let mut counts: HashMap<&Slug, usize> = HashMap::new();
        for (slug, _) in &self.entries {
            *counts.entry(slug).or_default() += 1;
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(position, (slug, _))| {
                counts[slug] > 1 && self.first_by_slug[slug] == *position
            })
            .map(|(_, (slug, _))| slug.clone())
            .collect()
    }
}
