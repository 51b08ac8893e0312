//! Attribute change subscriptions.
//!
//! Changes are queued per subscription when an attribute is written and
//! delivered in batches by [`crate::dom::Dom::flush_mutations`]. Within one
//! subscription records arrive in the order the changes were made; nothing is
//! promised across subscriptions.

use std::cell::Cell;
use std::rc::Rc;

use crossbeam::channel::{self, Receiver, Sender};

use crate::dom::document::ElementId;

/// One observed attribute change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: ElementId,
    pub attribute_name: String,
    pub old_value: Option<String>,
}

pub type MutationCallback = Rc<dyn Fn(&[MutationRecord])>;

/// Cancels a subscription. Cancelling twice is a no-op.
///
/// Dropping the handle does not cancel; the owner decides when to stop.
#[derive(Debug, Clone)]
pub struct CancellationHandle {
    active: Rc<Cell<bool>>,
}

impl CancellationHandle {
    /// Stop delivery. Records queued but not yet delivered are discarded.
    pub fn cancel(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

pub(crate) struct Subscription {
    target: ElementId,
    attributes: Vec<String>,
    callback: MutationCallback,
    tx: Sender<MutationRecord>,
    rx: Receiver<MutationRecord>,
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub(crate) fn new(
        target: ElementId,
        attributes: Vec<String>,
        callback: MutationCallback,
    ) -> (Self, CancellationHandle) {
        let (tx, rx) = channel::unbounded();
        let active = Rc::new(Cell::new(true));
        let handle = CancellationHandle {
            active: Rc::clone(&active),
        };
        let subscription = Self {
            target,
            attributes,
            callback,
            tx,
            rx,
            active,
        };
        (subscription, handle)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    fn wants(&self, target: ElementId, attribute: &str) -> bool {
        self.target == target && self.attributes.iter().any(|a| a == attribute)
    }

    /// Queue a record if this subscription watches `record`'s target and attribute.
    pub(crate) fn offer(&self, record: &MutationRecord) {
        if self.is_active() && self.wants(record.target, &record.attribute_name) {
            // Receiver lives as long as self, so send cannot fail
            let _ = self.tx.send(record.clone());
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Drain queued records; `None` if nothing is queued.
    pub(crate) fn take_batch(&self) -> Option<Batch> {
        let records: Vec<MutationRecord> = self.rx.try_iter().collect();
        if records.is_empty() {
            return None;
        }
        Some(Batch {
            callback: Rc::clone(&self.callback),
            active: Rc::clone(&self.active),
            records,
        })
    }
}

/// Records ready for delivery, detached from the document so the callback
/// may read it.
pub(crate) struct Batch {
    callback: MutationCallback,
    active: Rc<Cell<bool>>,
    records: Vec<MutationRecord>,
}

impl Batch {
    /// Invoke the callback unless the subscription was cancelled meanwhile.
    pub(crate) fn deliver(self) -> bool {
        if !self.active.get() {
            return false;
        }
        (self.callback)(&self.records);
        true
    }
}
