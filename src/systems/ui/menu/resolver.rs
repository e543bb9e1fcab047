//! Asynchronous value resolution for dynamic list items.
//!
//! A resolver turns a `ValueRequest` into a boxed future. The owning column keeps
//! the future keyed by `ItemId` and polls it once per frame from the menu tick, so
//! resolution never blocks input. Long-running work can be pushed onto a Bevy task
//! pool inside the resolver and awaited from the returned future.
use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, PoisonError},
};

use bevy::tasks::{block_on, futures_lite::future};

use super::{defs::AdjustDirection, item::ItemId};

pub type ValueFuture = Pin<Box<dyn Future<Output = String> + Send + 'static>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueRequest {
    pub item: ItemId,
    pub current: String,
    pub direction: AdjustDirection,
}

#[derive(Clone)]
pub struct DynamicValueResolver(Arc<dyn Fn(ValueRequest) -> ValueFuture + Send + Sync>);

impl DynamicValueResolver {
    pub fn new<F, Fut>(resolve: F) -> Self
    where
        F: Fn(ValueRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        Self(Arc::new(move |request| Box::pin(resolve(request)) as ValueFuture))
    }

    /// Resolver whose value is ready on the first poll.
    pub fn immediate<F>(resolve: F) -> Self
    where
        F: Fn(&ValueRequest) -> String + Send + Sync + 'static,
    {
        Self::new(move |request| std::future::ready(resolve(&request)))
    }

    pub(crate) fn resolve(&self, request: ValueRequest) -> ValueFuture {
        (self.0)(request)
    }
}

impl fmt::Debug for DynamicValueResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicValueResolver(..)")
    }
}

#[derive(Default)]
pub(crate) struct PendingResolutions {
    in_flight: Vec<(ItemId, Mutex<ValueFuture>)>,
}

impl PendingResolutions {
    pub fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.in_flight.iter().any(|(id, _)| *id == item)
    }

    /// Refuses a second resolution for the same item.
    pub fn start(&mut self, item: ItemId, future: ValueFuture) -> bool {
        if self.contains(item) {
            return false;
        }
        self.in_flight.push((item, Mutex::new(future)));
        true
    }

    /// Polls every in-flight future once and returns the finished ones in start order.
    pub fn poll(&mut self) -> Vec<(ItemId, String)> {
        let mut finished = Vec::new();
        self.in_flight.retain_mut(|(item, slot)| {
            let pending = slot.get_mut().unwrap_or_else(PoisonError::into_inner);
            match block_on(future::poll_once(pending)) {
                Some(value) => {
                    finished.push((*item, value));
                    false
                }
                None => true,
            }
        });
        finished
    }

    pub fn cancel(&mut self, item: ItemId) -> bool {
        let before = self.in_flight.len();
        self.in_flight.retain(|(id, _)| *id != item);
        before != self.in_flight.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.in_flight.len();
        self.in_flight.clear();
        cancelled
    }
}

impl fmt::Debug for PendingResolutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.in_flight.iter().map(|(id, _)| id))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        task::Poll,
    };

    use super::*;
    use crate::systems::ui::menu::item::MenuItem;

    /// Resolver that stays pending until the returned gate is opened.
    pub(crate) fn gated_resolver(value: &'static str) -> (DynamicValueResolver, Arc<AtomicBool>) {
        let gate = Arc::new(AtomicBool::new(false));
        let shared = gate.clone();
        let resolver = DynamicValueResolver::new(move |_request| {
            let gate = shared.clone();
            future::poll_fn(move |_| {
                if gate.load(Ordering::SeqCst) {
                    Poll::Ready(value.to_string())
                } else {
                    Poll::Pending
                }
            })
        });
        (resolver, gate)
    }

    fn request_for(item: ItemId) -> ValueRequest {
        ValueRequest {
            item,
            current: "old".to_string(),
            direction: AdjustDirection::Right,
        }
    }

    #[test]
    fn immediate_resolver_finishes_on_first_poll() {
        let item = MenuItem::new("x").id();
        let resolver = DynamicValueResolver::immediate(|request| format!("{}+", request.current));
        let mut pending = PendingResolutions::default();
        assert!(pending.start(item, resolver.resolve(request_for(item))));
        assert_eq!(pending.poll(), vec![(item, "old+".to_string())]);
        assert_eq!(pending.len(), 0);
    }

    #[test]
    fn one_resolution_per_item_and_independent_items() {
        let (resolver, gate) = gated_resolver("done");
        let first = MenuItem::new("a").id();
        let second = MenuItem::new("b").id();
        let mut pending = PendingResolutions::default();

        assert!(pending.start(first, resolver.resolve(request_for(first))));
        assert!(!pending.start(first, resolver.resolve(request_for(first))));
        assert!(pending.start(second, resolver.resolve(request_for(second))));
        assert!(pending.poll().is_empty());
        assert_eq!(pending.len(), 2);

        gate.store(true, Ordering::SeqCst);
        let finished = pending.poll();
        assert_eq!(finished.len(), 2);
        assert_eq!(finished[0].0, first);
        assert_eq!(finished[1].0, second);
    }

    #[test]
    fn yielding_future_needs_a_second_poll() {
        let item = MenuItem::new("x").id();
        let resolver = DynamicValueResolver::new(|request: ValueRequest| async move {
            future::yield_now().await;
            format!("{}!", request.current)
        });
        let mut pending = PendingResolutions::default();
        pending.start(item, resolver.resolve(request_for(item)));
        assert!(pending.poll().is_empty());
        assert_eq!(pending.poll(), vec![(item, "old!".to_string())]);
    }

    #[test]
    fn cancel_drops_in_flight_work() {
        let (resolver, _gate) = gated_resolver("never");
        let item = MenuItem::new("x").id();
        let mut pending = PendingResolutions::default();
        pending.start(item, resolver.resolve(request_for(item)));
        assert!(pending.cancel(item));
        assert!(!pending.cancel(item));
        pending.start(item, resolver.resolve(request_for(item)));
        assert_eq!(pending.cancel_all(), 1);
        assert!(!pending.contains(item));
    }
}
