use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::driver;
use super::interpolate::Interpolation;
use crate::reactive::{IntoMaybeDyn, MaybeDyn, Signal};

/// Identity of an animated value, used to give each value a single driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueId(u64);

static NEXT_VALUE_ID: AtomicU64 = AtomicU64::new(1);

pub type ListenerId = usize;

type Listener = Rc<dyn Fn(f32)>;

struct ValueInner {
    id: ValueId,
    value: Signal<f32>,
    velocity: Cell<f32>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<ListenerId>,
}

/// A float cell moved by animations.
///
/// Reads are tracked like a signal read, so widget properties built from an
/// animated value repaint as it moves. Listeners get every written value.
#[derive(Clone)]
pub struct AnimatedValue {
    inner: Rc<ValueInner>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            inner: Rc::new(ValueInner {
                id: ValueId(NEXT_VALUE_ID.fetch_add(1, Ordering::Relaxed)),
                value: Signal::new(initial),
                velocity: Cell::new(0.0),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn id(&self) -> ValueId {
        self.inner.id
    }

    pub fn get(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn get_untracked(&self) -> f32 {
        self.inner.value.get_untracked()
    }

    /// Velocity left behind by the last spring step, in units per second.
    pub fn velocity(&self) -> f32 {
        self.inner.velocity.get()
    }

    /// Jump to `value`, stopping whatever animation drives it.
    pub fn set_value(&self, value: f32) {
        driver::stop_driving(&[self.id()]);
        self.inner.velocity.set(0.0);
        self.write(value);
    }

    pub(crate) fn set_velocity(&self, velocity: f32) {
        self.inner.velocity.set(velocity);
    }

    pub(crate) fn write(&self, value: f32) {
        self.inner.value.set(value);
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }

    pub fn add_listener(&self, listener: impl Fn(f32) + 'static) -> ListenerId {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn remove_all_listeners(&self) {
        self.inner.listeners.borrow_mut().clear();
    }

    /// Derive a value that follows this one through `interpolation`.
    pub fn interpolate(&self, interpolation: Interpolation) -> Interpolated {
        Interpolated {
            source: self.clone(),
            interpolation: Rc::new(interpolation),
        }
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("id", &self.inner.id)
            .field("value", &self.get_untracked())
            .finish()
    }
}

impl IntoMaybeDyn<f32> for AnimatedValue {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::dynamic(move || self.get())
    }
}

/// An animated value seen through an [`Interpolation`].
#[derive(Clone)]
pub struct Interpolated {
    source: AnimatedValue,
    interpolation: Rc<Interpolation>,
}

impl Interpolated {
    pub fn get(&self) -> f32 {
        self.interpolation.map(self.source.get())
    }

    pub fn get_untracked(&self) -> f32 {
        self.interpolation.map(self.source.get_untracked())
    }

    /// Map an arbitrary input, ignoring the source's current value.
    pub fn at(&self, input: f32) -> f32 {
        self.interpolation.map(input)
    }

    pub fn source(&self) -> &AnimatedValue {
        &self.source
    }
}

impl IntoMaybeDyn<f32> for Interpolated {
    fn into_maybe_dyn(self) -> MaybeDyn<f32> {
        MaybeDyn::dynamic(move || self.get())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_listeners_see_writes() {
        let slide = AnimatedValue::new(0.0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let id = slide.add_listener(move |v| log.borrow_mut().push(v));
        slide.set_value(0.5);
        slide.set_value(1.0);
        slide.remove_listener(id);
        slide.set_value(0.0);

        assert_eq!(*seen.borrow(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_interpolated_tracks_source() {
        let progress = AnimatedValue::new(0.0);
        let back = progress.interpolate(Interpolation::linear([0.0, 180.0], [180.0, 360.0]));

        assert_eq!(back.get(), 180.0);
        progress.set_value(60.0);
        assert_eq!(back.get(), 240.0);
        assert_eq!(back.at(180.0), 360.0);
    }

    #[test]
    fn test_clones_share_state() {
        let a = AnimatedValue::new(0.5);
        let b = a.clone();
        b.set_value(1.0);
        assert_eq!(a.get(), 1.0);
        assert_eq!(a.id(), b.id());
    }
}
