//! Minimal element tree: lookup by id, descendant query by tag name, and
//! attribute reads and writes that feed the subscriptions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::trace;

use crate::dom::observer::{CancellationHandle, MutationRecord, Subscription};

/// Index of an element in its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attributes: HashMap<String, String>,
    children: Vec<ElementId>,
}

#[derive(Default)]
pub struct Document {
    elements: Vec<Element>,
    by_id: HashMap<String, ElementId>,
    subscriptions: Vec<Subscription>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element with tag `tag`
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            tag: tag.to_ascii_lowercase(),
            attributes: HashMap::new(),
            children: Vec::new(),
        });
        id
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(element) = self.elements.get_mut(parent.0) {
            element.children.push(child);
        }
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.elements.get(element.0).map(|e| e.tag.as_str())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.by_id.get(id).copied()
    }

    /// First descendant of `root` (depth first, document order) with tag `tag`.
    /// `root` itself is not a candidate.
    pub fn query_selector(&self, root: ElementId, tag: &str) -> Option<ElementId> {
        let mut stack: Vec<ElementId> = self
            .elements
            .get(root.0)?
            .children
            .iter()
            .rev()
            .copied()
            .collect();

        while let Some(current) = stack.pop() {
            let element = self.elements.get(current.0)?;
            if element.tag.eq_ignore_ascii_case(tag) {
                return Some(current);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        None
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(element.0)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    /// Write an attribute and queue a record for every subscription watching it.
    /// Writing the `id` attribute also updates id lookup.
    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(target) = self.elements.get_mut(element.0) else {
            return;
        };
        let old_value = target.attributes.insert(name.to_string(), value.to_string());

        if name == "id" {
            if let Some(old) = &old_value {
                self.by_id.remove(old);
            }
            self.by_id.insert(value.to_string(), element);
        }

        self.record(element, name, old_value);
    }

    pub fn remove_attribute(&mut self, element: ElementId, name: &str) {
        let Some(target) = self.elements.get_mut(element.0) else {
            return;
        };
        let Some(old_value) = target.attributes.remove(name) else {
            return;
        };
        if name == "id" {
            self.by_id.remove(&old_value);
        }
        self.record(element, name, Some(old_value));
    }

    fn record(&mut self, target: ElementId, name: &str, old_value: Option<String>) {
        self.subscriptions.retain(Subscription::is_active);
        let record = MutationRecord {
            target,
            attribute_name: name.to_string(),
            old_value,
        };
        for subscription in &self.subscriptions {
            subscription.offer(&record);
        }
    }
}

/// Shared handle to a document.
///
/// Cloning the handle shares the document. Subscription callbacks should
/// hold a [`WeakDom`] so they do not keep the document alive.
#[derive(Clone, Default)]
pub struct Dom {
    inner: Rc<RefCell<Document>>,
}

/// Non-owning handle, see [`Dom::downgrade`]
#[derive(Clone)]
pub struct WeakDom {
    inner: Weak<RefCell<Document>>,
}

impl WeakDom {
    pub fn upgrade(&self) -> Option<Dom> {
        self.inner.upgrade().map(|inner| Dom { inner })
    }
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakDom {
        WeakDom {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Read access to the document.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Write access to the document. Must not be called from inside another
    /// `read`/`write` closure.
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.read(|doc| doc.get_element_by_id(id))
    }

    pub fn query_selector(&self, root: ElementId, tag: &str) -> Option<ElementId> {
        self.read(|doc| doc.query_selector(root, tag))
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.read(|doc| doc.attribute(element, name).map(str::to_string))
    }

    pub fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        self.write(|doc| doc.set_attribute(element, name, value));
    }

    /// Watch `attribute` on `target`. The callback runs on
    /// [`Dom::flush_mutations`], never inside `set_attribute`.
    pub fn subscribe(
        &self,
        target: ElementId,
        attribute: &str,
        callback: impl Fn(&[MutationRecord]) + 'static,
    ) -> CancellationHandle {
        let (subscription, handle) =
            Subscription::new(target, vec![attribute.to_string()], Rc::new(callback));
        self.write(|doc| doc.subscriptions.push(subscription));
        handle
    }

    /// Number of subscriptions that have not been cancelled
    pub fn active_subscriptions(&self) -> usize {
        self.read(|doc| doc.subscriptions.iter().filter(|s| s.is_active()).count())
    }

    /// Records queued for active subscriptions
    pub fn pending_mutations(&self) -> usize {
        self.read(|doc| {
            doc.subscriptions
                .iter()
                .filter(|s| s.is_active())
                .map(|s| s.pending())
                .sum()
        })
    }

    /// Deliver queued records, one callback call per subscription with
    /// pending records. Returns the number of callbacks invoked.
    ///
    /// The document is not borrowed while callbacks run, so they may read and
    /// write it. Records produced by callbacks wait for the next flush.
    pub fn flush_mutations(&self) -> usize {
        let batches: Vec<_> = self.write(|doc| {
            doc.subscriptions.retain(Subscription::is_active);
            doc.subscriptions
                .iter()
                .filter_map(Subscription::take_batch)
                .collect()
        });

        let mut delivered = 0;
        for batch in batches {
            if batch.deliver() {
                delivered += 1;
            }
        }
        if delivered > 0 {
            trace!("delivered {} mutation batches", delivered);
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// `<div id="vid1"><div><progress value="0"></progress></div></div>`
    fn player(dom: &Dom) -> (ElementId, ElementId) {
        dom.write(|doc| {
            let container = doc.create_element("div");
            doc.set_attribute(container, "id", "vid1");
            let wrapper = doc.create_element("div");
            let progress = doc.create_element("PROGRESS");
            doc.set_attribute(progress, "value", "0");
            doc.append_child(container, wrapper);
            doc.append_child(wrapper, progress);
            (container, progress)
        })
    }

    #[test]
    fn test_lookup_and_query() {
        let dom = Dom::new();
        let (container, progress) = player(&dom);

        assert_eq!(dom.get_element_by_id("vid1"), Some(container));
        assert_eq!(dom.get_element_by_id("vid2"), None);
        assert_eq!(dom.query_selector(container, "progress"), Some(progress));
        assert_eq!(dom.query_selector(progress, "progress"), None);
        assert_eq!(dom.read(|d| d.tag(progress).map(str::to_string)), Some("progress".to_string()));
    }

    #[test]
    fn test_id_rename() {
        let dom = Dom::new();
        let (container, _) = player(&dom);
        dom.set_attribute(container, "id", "renamed");
        assert_eq!(dom.get_element_by_id("vid1"), None);
        assert_eq!(dom.get_element_by_id("renamed"), Some(container));

        dom.write(|d| d.remove_attribute(container, "id"));
        assert_eq!(dom.get_element_by_id("renamed"), None);
    }

    #[test]
    fn test_subscription_batches_records() {
        let dom = Dom::new();
        let (_, progress) = player(&dom);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _handle = dom.subscribe(progress, "value", move |records| {
            sink.borrow_mut().push(records.len());
        });

        dom.set_attribute(progress, "value", "0.1");
        dom.set_attribute(progress, "value", "0.2");
        dom.set_attribute(progress, "max", "1");
        // Nothing delivered until flushed
        assert!(seen.borrow().is_empty());
        assert_eq!(dom.pending_mutations(), 2);

        assert_eq!(dom.flush_mutations(), 1);
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(dom.flush_mutations(), 0);
    }

    #[test]
    fn test_records_keep_old_value() {
        let dom = Dom::new();
        let (_, progress) = player(&dom);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _handle = dom.subscribe(progress, "value", move |records| {
            sink.borrow_mut().extend(records.iter().cloned());
        });
        dom.set_attribute(progress, "value", "0.3");
        dom.flush_mutations();

        let records = seen.borrow();
        assert_eq!(records[0].target, progress);
        assert_eq!(records[0].attribute_name, "value");
        assert_eq!(records[0].old_value.as_deref(), Some("0"));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let dom = Dom::new();
        let (_, progress) = player(&dom);
        let calls = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&calls);
        let handle = dom.subscribe(progress, "value", move |_| *sink.borrow_mut() += 1);
        assert_eq!(dom.active_subscriptions(), 1);

        dom.set_attribute(progress, "value", "0.5");
        handle.cancel();
        handle.cancel();
        assert!(!handle.is_active());
        assert_eq!(dom.active_subscriptions(), 0);
        assert_eq!(dom.pending_mutations(), 0);

        assert_eq!(dom.flush_mutations(), 0);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_callback_can_read_document() {
        let dom = Dom::new();
        let (_, progress) = player(&dom);
        let seen = Rc::new(RefCell::new(None));

        let weak = dom.downgrade();
        let sink = Rc::clone(&seen);
        let _handle = dom.subscribe(progress, "value", move |_| {
            if let Some(dom) = weak.upgrade() {
                *sink.borrow_mut() = dom.attribute(progress, "value");
            }
        });

        dom.set_attribute(progress, "value", "0.75");
        dom.flush_mutations();
        assert_eq!(seen.borrow().as_deref(), Some("0.75"));
    }
}
