//! Registry of live timeline instances keyed by element id.
//!
//! Cloning the registry clones the handle; every clone sees the same
//! instances. Single-threaded: all access happens on the event loop.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::timeline::widget::TimelineWidget;

type Instances = HashMap<String, Box<dyn TimelineWidget>>;

#[derive(Clone, Default)]
pub struct TimelineRegistry {
    instances: Rc<RefCell<Instances>>,
}

impl TimelineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timeline under `id`, returning `true` if it replaced one.
    pub fn register<W: TimelineWidget + 'static>(&self, id: impl Into<String>, widget: W) -> bool {
        self.instances
            .borrow_mut()
            .insert(id.into(), Box::new(widget))
            .is_some()
    }

    pub fn unregister(&self, id: &str) -> bool {
        self.instances.borrow_mut().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.instances.borrow().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.instances.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.borrow().is_empty()
    }

    /// Run `f` against the timeline `id`; `None` if it is not registered.
    pub fn with<R>(&self, id: &str, f: impl FnOnce(&dyn TimelineWidget) -> R) -> Option<R> {
        let instances = self.instances.borrow();
        instances.get(id).map(|w| f(w.as_ref()))
    }

    /// Mutable counterpart of [`TimelineRegistry::with`].
    pub fn with_mut<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut dyn TimelineWidget) -> R,
    ) -> Option<R> {
        let mut instances = self.instances.borrow_mut();
        instances.get_mut(id).map(|w| f(w.as_mut()))
    }
}
