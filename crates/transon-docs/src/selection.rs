//! Session-wide "which example is expanded" state.
//!
//! Every example toggle holds a clone of the same coordinator and compares its own
//! slug with the current selection, so no ancestor has to thread the active example
//! down the tree.
//!
//! Whoever owns per-selection resources registers an observer; it runs synchronously
//! after every change, whichever clone of the handle made it.

use std::fmt;
use std::rc::Rc;

use zoon::{Mutable, Signal, SignalExt};

use crate::slug::Slug;

type SelectionObserver = Rc<dyn Fn(Option<&Slug>)>;

#[derive(Clone)]
pub struct SelectionCoordinator {
    active: Mutable<Option<Slug>>,
    observer: Option<SelectionObserver>,
}

impl fmt::Debug for SelectionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("active", &*self.active.lock_ref())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self {
            active: Mutable::new(None),
            observer: None,
        }
    }

    /// Coordinator whose every selection change is reported to `observer`.
    pub fn observed(observer: impl Fn(Option<&Slug>) + 'static) -> Self {
        Self {
            active: Mutable::new(None),
            observer: Some(Rc::new(observer)),
        }
    }

    pub fn current_selection(&self) -> Option<Slug> {
        self.active.get_cloned()
    }

    /// Make `slug` the only active example, or clear the selection with `None`.
    ///
    /// Writing the current selection again changes nothing and notifies nobody.
    pub fn set_selection(&self, slug: Option<Slug>) {
        if *self.active.lock_ref() == slug {
            return;
        }
        match &slug {
            Some(slug) => log::debug!("Selecting example '{slug}'"),
            None => log::debug!("Clearing example selection"),
        }
        self.active.set(slug.clone());
        if let Some(observer) = &self.observer {
            observer(slug.as_ref());
        }
    }

    /// Checkbox semantics: selects an inactive example, clears the active one.
    ///
    /// Returns the selection after the toggle.
    pub fn toggle(&self, slug: &Slug) -> Option<Slug> {
        let next = if self.is_active(slug) {
            None
        } else {
            Some(slug.clone())
        };
        self.set_selection(next.clone());
        next
    }

    pub fn is_active(&self, slug: &Slug) -> bool {
        self.active.lock_ref().as_ref() == Some(slug)
    }

    pub fn selection_signal(&self) -> impl Signal<Item = Option<Slug>> + Unpin + use<> {
        self.active.signal_cloned()
    }

    pub fn is_active_signal(&self, slug: Slug) -> impl Signal<Item = bool> + Unpin + use<> {
        self.active
            .signal_ref(move |active| active.as_ref() == Some(&slug))
            .dedupe()
    }
}

impl Default for SelectionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
