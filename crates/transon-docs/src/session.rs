//! One viewer session: the loaded tree, the shared selection and the playground of
//! the active example.

use std::rc::Rc;

use zoon::{Mutable, Signal};

use crate::docs::{DocumentationTree, ExampleRecord};
use crate::engine::Transformer;
use crate::playground::Playground;
use crate::selection::SelectionCoordinator;
use crate::slug::{Slug, SlugIndex};
use crate::text::TextStyle;

#[derive(Clone)]
pub struct ViewerSession {
    tree: Rc<DocumentationTree>,
    index: Rc<SlugIndex>,
    selection: SelectionCoordinator,
    active_playground: Mutable<Option<Rc<Playground>>>,
}

impl ViewerSession {
    pub fn new(tree: DocumentationTree, engine: Rc<dyn Transformer>, text_style: TextStyle) -> Self {
        let tree = Rc::new(tree);
        let index = Rc::new(SlugIndex::build(&tree));
        let active_playground = Mutable::new(None);
        let selection = SelectionCoordinator::observed({
            let tree = Rc::clone(&tree);
            let index = Rc::clone(&index);
            let active_playground = active_playground.clone();
            move |slug: Option<&Slug>| {
                // The previous playground is dropped before the next one opens.
                active_playground.set(None);
                let Some(slug) = slug else {
                    return;
                };
                match index.get(&tree, slug) {
                    Some(example) => {
                        let playground =
                            Playground::open(slug.clone(), example, Rc::clone(&engine), text_style);
                        active_playground.set(Some(Rc::new(playground)));
                    }
                    None => log::warn!("No example has the slug '{slug}'"),
                }
            }
        });
        Self {
            tree,
            index,
            selection,
            active_playground,
        }
    }

    pub fn tree(&self) -> &Rc<DocumentationTree> {
        &self.tree
    }

    pub fn index(&self) -> &SlugIndex {
        &self.index
    }

    /// The shared coordinator; selecting through any clone of it swaps the playground.
    pub fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    pub fn example(&self, slug: &Slug) -> Option<&ExampleRecord> {
        self.index.get(&self.tree, slug)
    }

    /// Activate `slug` (or nothing) and swap the playground accordingly.
    ///
    /// Reselecting an example after it was closed starts again from its stored payloads.
    pub fn select(&self, slug: Option<Slug>) {
        self.selection.set_selection(slug);
    }

    /// Toggle-button semantics on top of `select`.
    pub fn toggle(&self, slug: &Slug) {
        self.selection.toggle(slug);
    }

    pub fn active_playground(&self) -> Option<Rc<Playground>> {
        self.active_playground.get_cloned()
    }

    pub fn active_playground_signal(&self) -> impl Signal<Item = Option<Rc<Playground>>> + Unpin + use<> {
        self.active_playground.signal_cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TransformError;

    const PAYLOAD: &str = r#"{
        "rules": [
            {
                "rule": {"name": "attr"},
                "examples": [
                    {"name": "AttrSimpleFixedName", "template": {"$": "attr", "name": "a"}, "data": {"a": 1}, "result": 1}
                ]
            },
            {
                "rule": {"name": "map"},
                "examples": [
                    {"name": "MapDictToList", "template": {"$": "map"}, "data": {"x": 1}, "result": [1]}
                ]
            }
        ]
    }"#;

    fn session() -> ViewerSession {
        let tree = DocumentationTree::from_json(PAYLOAD).unwrap();
        let engine: Rc<dyn Transformer> =
            Rc::new(|_: &str, input: &str| -> Result<String, TransformError> { Ok(input.len().to_string()) });
        ViewerSession::new(tree, engine, TextStyle::Compact)
    }

    #[test]
    fn selecting_opens_a_playground_for_that_example() {
        let session = session();
        let slug = Slug::from("attr-AttrSimpleFixedName");
        session.select(Some(slug.clone()));

        let playground = session.active_playground().unwrap();
        assert_eq!(playground.slug(), &slug);
        assert_eq!(playground.input_text(), r#"{"a":1}"#);
    }

    #[test]
    fn switching_examples_drops_the_previous_playground() {
        let session = session();
        session.select(Some(Slug::from("attr-AttrSimpleFixedName")));
        let first = Rc::downgrade(&session.active_playground().unwrap());

        session.toggle(&Slug::from("map-MapDictToList"));
        assert!(first.upgrade().is_none());
        assert_eq!(
            session.active_playground().unwrap().slug().as_str(),
            "map-MapDictToList"
        );
        assert_eq!(
            session.selection().current_selection(),
            Some(Slug::from("map-MapDictToList"))
        );
    }

    #[test]
    fn toggling_the_active_example_closes_it() {
        let session = session();
        let slug = Slug::from("attr-AttrSimpleFixedName");
        session.toggle(&slug);
        session.toggle(&slug);
        assert!(session.active_playground().is_none());
        assert_eq!(session.selection().current_selection(), None);
    }

    #[test]
    fn unknown_slug_selects_without_playground() {
        let session = session();
        session.select(Some(Slug::from("attr-Missing")));
        assert!(session.active_playground().is_none());
        assert_eq!(session.selection().current_selection(), Some(Slug::from("attr-Missing")));
    }

    #[test]
    fn selecting_through_a_shared_handle_swaps_the_playground() {
        let session = session();
        session.select(Some(Slug::from("attr-AttrSimpleFixedName")));
        let first = Rc::downgrade(&session.active_playground().unwrap());

        let nested_renderer = session.selection().clone();
        nested_renderer.set_selection(Some(Slug::from("map-MapDictToList")));
        assert!(first.upgrade().is_none());
        assert_eq!(
            session.active_playground().unwrap().slug().as_str(),
            "map-MapDictToList"
        );

        nested_renderer.toggle(&Slug::from("map-MapDictToList"));
        assert!(session.active_playground().is_none());
        session.select(Some(Slug::from("map-MapDictToList")));
        assert_eq!(
            session.active_playground().unwrap().slug().as_str(),
            "map-MapDictToList"
        );
    }

    #[test]
    fn reselecting_the_active_example_keeps_its_edits() {
        let session = session();
        let slug = Slug::from("attr-AttrSimpleFixedName");
        session.select(Some(slug.clone()));
        session.active_playground().unwrap().edit_input("{}");

        session.select(Some(slug));
        assert_eq!(session.active_playground().unwrap().input_text(), "{}");
    }

    #[test]
    fn duplicate_slugs_share_the_first_occurrence() {
        let tree = DocumentationTree::from_json(
            r#"{
                "rules": [
                    {"rule": {"name": "attr"}, "examples": [{"name": "Same", "data": 1}]},
                    {"rule": {"name": "attr"}, "examples": [{"name": "Same", "data": 2}]}
                ]
            }"#,
        )
        .unwrap();
        let engine: Rc<dyn Transformer> =
            Rc::new(|_: &str, input: &str| -> Result<String, TransformError> { Ok(input.to_owned()) });
        let session = ViewerSession::new(tree, engine, TextStyle::Compact);

        session.toggle(&Slug::from("attr-Same"));
        assert_eq!(session.active_playground().unwrap().input_text(), "1");
    }
}
