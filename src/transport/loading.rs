// src/transport/loading.rs
use scopeguard::ScopeGuard;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Release = Box<dyn FnOnce(()) + Send>;

/// Drives the spinner. Visible while at least one request holds a guard.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    in_flight: Arc<AtomicUsize>,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        let in_flight = Arc::clone(&self.in_flight);
        let release: Release = Box::new(move |_| {
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
        LoadingGuard(scopeguard::guard((), release))
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Hides the spinner when dropped, whichever way the request ended.
pub struct LoadingGuard(ScopeGuard<(), Release>);
