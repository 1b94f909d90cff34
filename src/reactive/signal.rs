use std::sync::{Arc, PoisonError, RwLock};

use super::invalidation::request_frame;
use super::runtime::{SignalId, flush_effects, try_with_runtime, with_runtime};

struct SignalInner<T> {
    id: SignalId,
    value: RwLock<T>,
}

/// A reactive cell.
///
/// Reads inside an effect subscribe that effect; writes that change the value
/// re-run subscribers and request a new frame.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let id = with_runtime(|rt| rt.allocate_signal());
        Self {
            inner: Arc::new(SignalInner {
                id,
                value: RwLock::new(value),
            }),
        }
    }

    pub fn split(self) -> (ReadSignal<T>, WriteSignal<T>) {
        (
            ReadSignal {
                signal: self.clone(),
            },
            WriteSignal { signal: self },
        )
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        try_with_runtime(|rt| rt.track_read(self.inner.id));
        self.with_untracked(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn notify(&self) {
        let should_flush = try_with_runtime(|rt| rt.notify_write(self.inner.id)).unwrap_or(false);
        if should_flush {
            flush_effects();
        }
        request_frame();
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Store `value`, notifying subscribers only when it differs.
    pub fn set(&self, value: T) {
        {
            let mut guard = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if *guard == value {
                return;
            }
            *guard = value;
        }
        self.notify();
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Mutate in place, notifying subscribers only when the value changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut guard = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let old_value = guard.clone();
            f(&mut guard);
            if *guard == old_value {
                return;
            }
        }
        self.notify();
    }
}

/// Read-only handle to a signal.
#[derive(Clone)]
pub struct ReadSignal<T> {
    signal: Signal<T>,
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.signal.get()
    }

    pub fn get_untracked(&self) -> T {
        self.signal.get_untracked()
    }
}

/// Write-only handle to a signal.
#[derive(Clone)]
pub struct WriteSignal<T> {
    signal: Signal<T>,
}

impl<T: PartialEq> WriteSignal<T> {
    pub fn set(&self, value: T) {
        self.signal.set(value);
    }
}

impl<T: PartialEq + Clone> WriteSignal<T> {
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.signal.update(f);
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
