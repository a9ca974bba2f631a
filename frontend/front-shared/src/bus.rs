use std::rc::Rc;

/// Synchronous fan-out of events to every current subscriber, in
/// subscription order.
pub struct EventBus<E> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Rc<dyn Fn(&E)>)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        EventBus { next_id: 0, handlers: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn subscribe(&mut self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Rc::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
    }

    /// Snapshot of the current handlers. Publishing through a snapshot lets
    /// handlers touch the bus without holding a borrow of it.
    pub fn handlers(&self) -> Vec<Rc<dyn Fn(&E)>> {
        self.handlers.iter().map(|(_, handler)| handler.clone()).collect()
    }

    pub fn publish(&self, event: &E) {
        for handler in self.handlers() {
            handler(event);
        }
    }
}
