//! Listeners for selection changes. A listener stays registered for as long
//! as its `Subscription` handle is alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::model::Section;

type Handler = Box<dyn FnMut(Option<Section>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
    // While handlers run they are taken out of `handlers`, so unsubscribes
    // are queued here and applied once publishing finishes.
    publishing: usize,
    pending_removals: Vec<u64>,
}

#[derive(Clone, Default)]
pub struct SelectionBus {
    listeners: Rc<RefCell<Listeners>>,
}

/// Unsubscribes when dropped.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn subscribe(&self, handler: impl FnMut(Option<Section>) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.handlers.push((id, Box::new(handler)));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Calls every listener. Listeners may subscribe or drop subscriptions
    /// (their own included) from inside the call.
    pub fn publish(&self, selection: Option<Section>) {
        let mut handlers = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.publishing += 1;
            std::mem::take(&mut listeners.handlers)
        };

        for (_, handler) in handlers.iter_mut() {
            handler(selection);
        }

        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            // Anything subscribed during the calls goes after the existing ones
            handlers.append(&mut listeners.handlers);
            listeners.publishing -= 1;
            let removed = if listeners.publishing == 0 {
                let ids = std::mem::take(&mut listeners.pending_removals);
                remove_ids(&mut handlers, &ids)
            } else {
                vec![]
            };
            listeners.handlers = handlers;
            removed
        };
        // Dropped handlers may own subscriptions of their own
        drop(removed);
    }

    pub fn num_listeners(&self) -> usize {
        self.listeners.borrow().handlers.len()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let removed = {
                let mut listeners = listeners.borrow_mut();
                if listeners.publishing > 0 {
                    listeners.pending_removals.push(self.id);
                }
                remove_ids(&mut listeners.handlers, &[self.id])
            };
            drop(removed);
        }
    }
}

fn remove_ids(handlers: &mut Vec<(u64, Handler)>, ids: &[u64]) -> Vec<(u64, Handler)> {
    let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(handlers)
        .into_iter()
        .partition(|(id, _)| ids.contains(id));
    *handlers = kept;
    removed
}

impl std::fmt::Debug for SelectionBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionBus")
            .field("listeners", &self.num_listeners())
            .finish()
    }
}
