//! Live preview of the active example.
//!
//! A playground exists only while its example is selected. It owns three text
//! buffers: `input` and `template` are edited by the visitor, `result` is written
//! exclusively by the recompute pipeline.

use std::rc::Rc;

use zoon::{Mutable, Signal};

use crate::docs::ExampleRecord;
use crate::engine::Transformer;
use crate::slug::Slug;
use crate::text::TextStyle;

/// Snapshot of the three editor buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaygroundBuffers {
    pub input_text: String,
    pub template_text: String,
    pub result_text: String,
}

impl PlaygroundBuffers {
    /// Buffers as they look right after activation, before the first recompute.
    pub fn seed(example: &ExampleRecord, style: TextStyle) -> Self {
        let seed = |value: &serde_json::Value| {
            style.to_text(value).unwrap_or_else(|_| value.to_string())
        };
        Self {
            input_text: seed(&example.data),
            template_text: seed(&example.template),
            result_text: seed(&example.result),
        }
    }
}

pub struct Playground {
    slug: Slug,
    example: ExampleRecord,
    engine: Rc<dyn Transformer>,
    input_text: Mutable<String>,
    template_text: Mutable<String>,
    result_text: Mutable<String>,
    /// Message of the latest failed recompute, cleared by the next successful one.
    error: Mutable<Option<String>>,
}

impl Playground {
    /// Seed the buffers from the stored payloads and run the first recompute.
    ///
    /// The stored `result` is what the result buffer shows until the engine produces
    /// something, and stays there if that first run fails.
    pub fn open(
        slug: Slug,
        example: &ExampleRecord,
        engine: Rc<dyn Transformer>,
        style: TextStyle,
    ) -> Self {
        let seeded = PlaygroundBuffers::seed(example, style);
        let playground = Self {
            input_text: Mutable::new(seeded.input_text),
            template_text: Mutable::new(seeded.template_text),
            result_text: Mutable::new(seeded.result_text),
            error: Mutable::new(None),
            slug,
            example: example.clone(),
            engine,
        };
        log::debug!("Opened playground for '{}'", playground.slug);
        playground.recompute();
        playground
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn example(&self) -> &ExampleRecord {
        &self.example
    }

    pub fn buffers(&self) -> PlaygroundBuffers {
        PlaygroundBuffers {
            input_text: self.input_text.get_cloned(),
            template_text: self.template_text.get_cloned(),
            result_text: self.result_text.get_cloned(),
        }
    }

    pub fn input_text(&self) -> String {
        self.input_text.get_cloned()
    }

    pub fn template_text(&self) -> String {
        self.template_text.get_cloned()
    }

    pub fn result_text(&self) -> String {
        self.result_text.get_cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.error.get_cloned()
    }

    pub fn edit_input(&self, text: impl Into<String>) {
        if Self::replace(&self.input_text, text.into()) {
            self.recompute();
        }
    }

    pub fn edit_template(&self, text: impl Into<String>) {
        if Self::replace(&self.template_text, text.into()) {
            self.recompute();
        }
    }

    fn replace(buffer: &Mutable<String>, text: String) -> bool {
        let mut current = buffer.lock_mut();
        if *current == text {
            return false;
        }
        *current = text;
        true
    }

    /// Run the engine on the current buffers, unless one of them is empty.
    ///
    /// A failure keeps the last successful result on screen and raises `error`.
    fn recompute(&self) {
        let input = self.input_text.lock_ref();
        let template = self.template_text.lock_ref();
        if input.is_empty() || template.is_empty() {
            return;
        }
        match self.engine.transform(&template, &input) {
            Ok(result) => {
                self.result_text.set_neq(result);
                self.error.set_neq(None);
            }
            Err(error) => {
                log::warn!("Example '{}' failed to transform: {error}", self.slug);
                self.error.set_neq(Some(error.to_string()));
            }
        }
    }

    pub fn input_text_signal(&self) -> impl Signal<Item = String> + Unpin + use<> {
        self.input_text.signal_cloned()
    }

    pub fn template_text_signal(&self) -> impl Signal<Item = String> + Unpin + use<> {
        self.template_text.signal_cloned()
    }

    pub fn result_text_signal(&self) -> impl Signal<Item = String> + Unpin + use<> {
        self.result_text.signal_cloned()
    }

    pub fn error_signal(&self) -> impl Signal<Item = Option<String>> + Unpin + use<> {
        self.error.signal_cloned()
    }
}

impl Drop for Playground {
    fn drop(&mut self) {
        log::debug!("Closed playground for '{}'", self.slug);
    }
}
