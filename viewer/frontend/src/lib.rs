//! Browser viewer of the Transon documentation.
//!
//! The page loads the exported documentation payload and the engine, then calls
//! `init(payload)` once. Transforms go through the page's global
//! `transform(template, value)` function.

use std::cell::Cell;
use std::rc::Rc;

use transon_docs::clock::Clock;
use transon_docs::zoon::{eprintln, println, *};
use transon_docs::{DocumentationTree, TransformError, Transformer, ViewerConfig, ViewerSession};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

mod app;
mod panel;

static VIEWER_CONFIG: &str = include_str!("../../Viewer.toml");

thread_local! {
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = transform)]
    fn engine_transform(template: &str, value: &str) -> Result<String, JsValue>;
}

/// The engine the page exposes as a global `transform` function.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsTransformer;

impl Transformer for JsTransformer {
    fn transform(&self, template: &str, input: &str) -> Result<String, TransformError> {
        engine_transform(template, input).map_err(|error| TransformError::rejected(js_error_message(&error)))
    }
}

fn js_error_message(error: &JsValue) -> String {
    if let Some(message) = error.as_string() {
        return message;
    }
    match error.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{error:?}"),
    }
}

/// Wall-clock milliseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// Client width of the document, scrollbar excluded.
pub fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .map(|element| u32::try_from(element.client_width()).unwrap_or_default())
        .unwrap_or_default()
}

#[wasm_bindgen]
pub fn init(payload: String) {
    if STARTED.replace(true) {
        eprintln!("Transon docs viewer is already running");
        return;
    }

    let config = match ViewerConfig::from_toml_str(VIEWER_CONFIG) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Invalid Viewer.toml, using defaults: {error}");
            ViewerConfig::default()
        }
    };
    let tree = match DocumentationTree::from_json(&payload) {
        Ok(tree) => tree,
        Err(error) => {
            eprintln!("Failed to load documentation payload: {error}");
            return;
        }
    };
    println!(
        "Transon docs: {} rules, {} examples",
        tree.rules.len(),
        tree.example_count()
    );

    let session = ViewerSession::new(tree, Rc::new(JsTransformer), config.text);
    start_app("app", move || app::App::new(session, config).root());
}
