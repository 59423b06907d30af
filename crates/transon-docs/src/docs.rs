//! The documentation tree: rules, their parameters and runnable examples.
//!
//! The tree is built once from the exporter payload and never mutated afterwards.
//! The payload nests names and docs under `rule` / `param` objects; the model keeps
//! them flat on the node.

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;

/// A runnable (template, data, result) triple.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExampleRecord {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub template: Value,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub result: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterNode {
    pub name: String,
    pub doc: Option<String>,
    pub examples: Vec<ExampleRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleNode {
    pub name: String,
    pub doc: Option<String>,
    pub examples: Vec<ExampleRecord>,
    pub params: Vec<ParameterNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "WireTree")]
pub struct DocumentationTree {
    pub version: Option<String>,
    pub doc: Option<String>,
    pub rules: Vec<RuleNode>,
}

impl DocumentationTree {
    /// Parse the serialized tree handed over by the page on startup.
    pub fn from_json(payload: &str) -> Result<Self, LoadError> {
        let tree: Self = serde_json::from_str(payload)?;
        log::debug!(
            "Loaded documentation tree with {} rules and {} examples",
            tree.rules.len(),
            tree.example_count()
        );
        Ok(tree)
    }

    pub fn rule(&self, name: &str) -> Option<&RuleNode> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Number of examples reachable from the tree, rule and parameter scoped alike.
    pub fn example_count(&self) -> usize {
        self.rules
            .iter()
            .map(|rule| {
                rule.examples.len()
                    + rule
                        .params
                        .iter()
                        .map(|param| param.examples.len())
                        .sum::<usize>()
            })
            .sum()
    }
}

// -- Wire format --

#[derive(Deserialize)]
struct WireDefinition {
    name: String,
    #[serde(default)]
    doc: Option<String>,
}

#[derive(Deserialize)]
struct WireParam {
    param: WireDefinition,
    #[serde(default)]
    examples: Vec<ExampleRecord>,
}

#[derive(Deserialize)]
struct WireRule {
    rule: WireDefinition,
    #[serde(default)]
    examples: Vec<ExampleRecord>,
    #[serde(default)]
    params: Vec<WireParam>,
}

#[derive(Deserialize)]
struct WireTree {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    rules: Vec<WireRule>,
}

impl From<WireParam> for ParameterNode {
    fn from(wire: WireParam) -> Self {
        Self {
            name: wire.param.name,
            doc: wire.param.doc,
            examples: wire.examples,
        }
    }
}

impl From<WireRule> for RuleNode {
    fn from(wire: WireRule) -> Self {
        Self {
            name: wire.rule.name,
            doc: wire.rule.doc,
            examples: wire.examples,
            params: wire.params.into_iter().map(ParameterNode::from).collect(),
        }
    }
}

impl From<WireTree> for DocumentationTree {
    fn from(wire: WireTree) -> Self {
        Self {
            version: wire.version,
            doc: wire.doc,
            rules: wire.rules.into_iter().map(RuleNode::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAYLOAD: &str = r#"{
        "doc": "Transformer class interpolates template with input data.",
        "rules": [
            {
                "rule": {"name": "attr", "doc": "Returns attribute of the current value."},
                "examples": [
                    {
                        "name": "AttrSimpleFixedName",
                        "template": {"$": "attr", "name": "a"},
                        "data": {"a": 1},
                        "result": 1
                    }
                ],
                "params": [
                    {
                        "param": {"name": "name", "doc": "Name of the attribute."},
                        "examples": [
                            {
                                "name": "AttrDynamicName",
                                "doc": "Name computed from data.",
                                "template": {"$": "attr", "name": {"$": "this"}},
                                "data": "x",
                                "result": null
                            }
                        ]
                    }
                ]
            },
            {"rule": {"name": "this"}}
        ]
    }"#;

    #[test]
    fn parses_nested_wire_format_into_flat_nodes() {
        let tree = DocumentationTree::from_json(PAYLOAD).unwrap();
        assert_eq!(tree.rules.len(), 2);
        assert_eq!(tree.version, None);

        let attr = tree.rule("attr").unwrap();
        assert_eq!(attr.doc.as_deref(), Some("Returns attribute of the current value."));
        assert_eq!(attr.examples[0].template, json!({"$": "attr", "name": "a"}));
        assert_eq!(attr.examples[0].result, json!(1));
        assert_eq!(attr.params[0].name, "name");
        assert_eq!(attr.params[0].examples[0].doc.as_deref(), Some("Name computed from data."));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let tree = DocumentationTree::from_json(PAYLOAD).unwrap();
        let this = tree.rule("this").unwrap();
        assert!(this.doc.is_none());
        assert!(this.examples.is_empty());
        assert!(this.params.is_empty());
    }

    #[test]
    fn counts_rule_and_param_examples() {
        let tree = DocumentationTree::from_json(PAYLOAD).unwrap();
        assert_eq!(tree.example_count(), 2);
    }

    #[test]
    fn rejects_malformed_payload() {
        let error = DocumentationTree::from_json(r#"{"rules": [{"examples": []}]}"#).unwrap_err();
        assert!(matches!(error, LoadError::Payload(_)));
    }
}
