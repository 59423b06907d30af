//! Documentation viewer core for the Transon JSON template engine.
//!
//! The browser viewer and the `transon-docs` CLI are both thin shells over this crate:
//! the documentation tree and its slugs, the single-active-example selection, the live
//! example playground and the breakout layout all live here and are testable natively.

pub mod clock;
pub mod config;
pub mod debounce;
pub mod docs;
pub mod engine;
pub mod error;
pub mod layout;
pub mod markup;
pub mod outline;
pub mod playground;
pub mod selection;
pub mod session;
pub mod slug;
pub mod text;

pub use zoon;

pub use config::ViewerConfig;
pub use docs::{DocumentationTree, ExampleRecord, ParameterNode, RuleNode};
pub use engine::{JsonTransformer, TransformError, Transformer};
pub use error::LoadError;
pub use playground::{Playground, PlaygroundBuffers};
pub use selection::SelectionCoordinator;
pub use session::ViewerSession;
pub use slug::{Slug, SlugIndex};
pub use text::TextStyle;
