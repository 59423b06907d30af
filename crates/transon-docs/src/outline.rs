//! Renderer-neutral view of the documentation tree.
//!
//! Both the browser viewer and the CLI render from these views: every example already
//! carries its slug, and empty example or parameter sections are dropped so renderers
//! don't have to special-case them.

use std::fmt::Write;

use crate::docs::{DocumentationTree, ExampleRecord};
use crate::slug::{Slug, scope_prefix, slug_for};

#[derive(Clone, Debug, PartialEq)]
pub struct ExampleEntry {
    pub slug: Slug,
    pub name: String,
}

/// Toggle buttons of one scope, followed by the playground of whichever is active.
#[derive(Clone, Debug, PartialEq)]
pub struct ExamplesSectionView {
    pub entries: Vec<ExampleEntry>,
}

impl ExamplesSectionView {
    fn build(rule: &str, param: Option<&str>, examples: &[ExampleRecord]) -> Option<Self> {
        if examples.is_empty() {
            return None;
        }
        let entries = examples
            .iter()
            .map(|example| ExampleEntry {
                slug: slug_for(rule, param, &example.name),
                name: example.name.clone(),
            })
            .collect();
        Some(Self { entries })
    }

    pub fn contains(&self, slug: &Slug) -> bool {
        self.entries.iter().any(|entry| &entry.slug == slug)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamView {
    pub name: String,
    pub doc: Option<String>,
    /// Slug prefix of the parameter's examples.
    pub scope: String,
    pub examples: Option<ExamplesSectionView>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleView {
    pub name: String,
    pub doc: Option<String>,
    pub examples: Option<ExamplesSectionView>,
    /// Empty when the rule takes no parameters; the section is then omitted.
    pub params: Vec<ParamView>,
}

pub fn outline(tree: &DocumentationTree) -> Vec<RuleView> {
    tree.rules
        .iter()
        .map(|rule| RuleView {
            name: rule.name.clone(),
            doc: rule.doc.clone(),
            examples: ExamplesSectionView::build(&rule.name, None, &rule.examples),
            params: rule
                .params
                .iter()
                .map(|param| ParamView {
                    name: param.name.clone(),
                    doc: param.doc.clone(),
                    scope: scope_prefix(&rule.name, Some(&param.name)),
                    examples: ExamplesSectionView::build(
                        &rule.name,
                        Some(&param.name),
                        &param.examples,
                    ),
                })
                .collect(),
        })
        .collect()
}

/// Plain-text outline, with the active example (if any) starred.
pub fn render_text(rules: &[RuleView], active: Option<&Slug>) -> String {
    let mut out = String::new();
    for rule in rules {
        let _ = writeln!(out, "{}", rule.name);
        write_doc(&mut out, rule.doc.as_deref(), 2);
        write_examples(&mut out, rule.examples.as_ref(), active, 2);
        if !rule.params.is_empty() {
            let _ = writeln!(out, "  Parameters:");
            for param in &rule.params {
                let _ = writeln!(out, "    {}", param.name);
                write_doc(&mut out, param.doc.as_deref(), 6);
                write_examples(&mut out, param.examples.as_ref(), active, 6);
            }
        }
    }
    out
}

fn write_doc(out: &mut String, doc: Option<&str>, indent: usize) {
    if let Some(summary) = doc.and_then(|doc| doc.lines().find(|line| !line.trim().is_empty())) {
        let _ = writeln!(out, "{:indent$}{}", "", summary.trim());
    }
}

fn write_examples(
    out: &mut String,
    section: Option<&ExamplesSectionView>,
    active: Option<&Slug>,
    indent: usize,
) {
    let Some(section) = section else {
        return;
    };
    let names: Vec<String> = section
        .entries
        .iter()
        .map(|entry| {
            if Some(&entry.slug) == active {
                format!("*{}", entry.name)
            } else {
                entry.name.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "{:indent$}Examples: {}", "", names.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "rules": [
            {
                "rule": {"name": "attr", "doc": "Returns attribute.\nLonger text."},
                "examples": [{"name": "AttrSimpleFixedName"}],
                "params": [
                    {"param": {"name": "name"}, "examples": [{"name": "AttrDynamicName"}]},
                    {"param": {"name": "default", "doc": "Fallback value."}}
                ]
            },
            {"rule": {"name": "this"}}
        ]
    }"#;

    fn rules() -> Vec<RuleView> {
        outline(&DocumentationTree::from_json(PAYLOAD).unwrap())
    }

    #[test]
    fn empty_sections_are_dropped() {
        let rules = rules();
        assert!(rules[1].examples.is_none());
        assert!(rules[1].params.is_empty());
        assert!(rules[0].params[1].examples.is_none());
    }

    #[test]
    fn entries_carry_their_slugs() {
        let rules = rules();
        let attr_examples = rules[0].examples.as_ref().unwrap();
        assert_eq!(attr_examples.entries[0].slug.as_str(), "attr-AttrSimpleFixedName");
        assert_eq!(rules[0].params[0].scope, "attr-name");

        let param_examples = rules[0].params[0].examples.as_ref().unwrap();
        assert!(param_examples.contains(&Slug::from("attr-name-AttrDynamicName")));
        assert!(!param_examples.contains(&Slug::from("attr-AttrSimpleFixedName")));
    }

    #[test]
    fn text_outline_stars_the_active_example() {
        let text = render_text(&rules(), Some(&Slug::from("attr-name-AttrDynamicName")));
        assert_eq!(
            text,
            "attr\n\
             \x20 Returns attribute.\n\
             \x20 Examples: AttrSimpleFixedName\n\
             \x20 Parameters:\n\
             \x20   name\n\
             \x20     Examples: *AttrDynamicName\n\
             \x20   default\n\
             \x20     Fallback value.\n\
             this\n"
        );
    }
}
