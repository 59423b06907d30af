//! Boundary to the transformation engine.
//!
//! The viewer never interprets templates itself. It hands the raw editor texts to a
//! `Transformer` and shows whatever text comes back.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::text::TextStyle;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("template is not valid JSON: {0}")]
    InvalidTemplate(#[source] serde_json::Error),
    #[error("input is not valid JSON: {0}")]
    InvalidInput(#[source] serde_json::Error),
    #[error("cannot serialize result: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
}

impl TransformError {
    pub fn rejected(message: impl fmt::Display) -> Self {
        Self::Rejected(message.to_string())
    }
}

pub trait Transformer {
    /// Transform `input` with `template`, both in the engine's own textual grammar.
    fn transform(&self, template: &str, input: &str) -> Result<String, TransformError>;
}

impl<F> Transformer for F
where
    F: Fn(&str, &str) -> Result<String, TransformError>,
{
    fn transform(&self, template: &str, input: &str) -> Result<String, TransformError> {
        self(template, input)
    }
}

/// Adapts a structured transform (`template`, `data`) -> result to the textual boundary.
///
/// Both texts are parsed as JSON; a `None` result means "no content" and is shown as
/// `null`; the result is serialized in `style`.
pub struct JsonTransformer<F> {
    apply: F,
    style: TextStyle,
}

impl<F> JsonTransformer<F>
where
    F: Fn(&Value, &Value) -> Result<Option<Value>, TransformError>,
{
    pub fn new(apply: F) -> Self {
        Self {
            apply,
            style: TextStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

impl<F> Transformer for JsonTransformer<F>
where
    F: Fn(&Value, &Value) -> Result<Option<Value>, TransformError>,
{
    fn transform(&self, template: &str, input: &str) -> Result<String, TransformError> {
        let template: Value = serde_json::from_str(template).map_err(TransformError::InvalidTemplate)?;
        let data: Value = serde_json::from_str(input).map_err(TransformError::InvalidInput)?;
        let result = (self.apply)(&template, &data)?.unwrap_or(Value::Null);
        self.style
            .to_text(&result)
            .map_err(TransformError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr_rule() -> impl Fn(&Value, &Value) -> Result<Option<Value>, TransformError> {
        |template: &Value, data: &Value| -> Result<Option<Value>, TransformError> {
            let name = template["name"]
                .as_str()
                .ok_or_else(|| TransformError::rejected("attr: `name` must be a string"))?;
            Ok(data.get(name).cloned())
        }
    }

    #[test]
    fn closures_are_transformers() {
        let echo = |template: &str, input: &str| -> Result<String, TransformError> {
            Ok(format!("{template}|{input}"))
        };
        assert_eq!(echo.transform("t", "i").unwrap(), "t|i");
    }

    #[test]
    fn json_transformer_round_trips_through_text() {
        let engine = JsonTransformer::new(attr_rule());
        let result = engine.transform(r#"{"$":"attr","name":"a"}"#, r#"{"a":{"b":1}}"#).unwrap();
        assert_eq!(result, r#"{"b":1}"#);

        let engine = engine.with_style(TextStyle::pretty());
        let result = engine.transform(r#"{"$":"attr","name":"a"}"#, r#"{"a":{"b":1}}"#).unwrap();
        assert_eq!(result, "{\n  \"b\": 1\n}");
    }

    #[test]
    fn no_content_is_null() {
        let engine = JsonTransformer::new(attr_rule());
        assert_eq!(engine.transform(r#"{"name":"missing"}"#, "{}").unwrap(), "null");
    }

    #[test]
    fn parse_failures_name_the_offending_side() {
        let engine = JsonTransformer::new(attr_rule());
        assert!(matches!(
            engine.transform("{", "{}"),
            Err(TransformError::InvalidTemplate(_))
        ));
        assert!(matches!(
            engine.transform(r#"{"name":"a"}"#, r#"{"a":"#),
            Err(TransformError::InvalidInput(_))
        ));
    }

    #[test]
    fn rule_errors_pass_through() {
        let engine = JsonTransformer::new(attr_rule());
        let error = engine.transform(r#"{"name":1}"#, "{}").unwrap_err();
        assert_eq!(error.to_string(), "attr: `name` must be a string");
    }
}
