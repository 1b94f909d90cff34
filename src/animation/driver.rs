//! Frame-driven scheduler for running animations.
//!
//! The host calls [`tick`] once per frame with the elapsed time. Each
//! animated value has at most one driving animation: starting a new
//! animation on a value stops the previous one, whose completion callback
//! then receives `finished = false`.
//!
//! Runners advance outside the driver's borrow, so value listeners and
//! completion callbacks may start or stop animations freely.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use super::composite::{Animation, Runner, Step};
use super::value::ValueId;
use crate::reactive::request_frame;

/// Handle to a started animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

/// Called once when an animation ends; the flag is true when it ran to
/// completion and false when it was stopped or superseded.
pub type Completion = Box<dyn FnOnce(bool)>;

struct ActiveAnimation {
    handle: AnimationHandle,
    runner: Runner,
    drives: Vec<ValueId>,
    on_complete: Option<Completion>,
}

#[derive(Default)]
struct Driver {
    active: Vec<ActiveAnimation>,
    owners: HashMap<ValueId, AnimationHandle>,
    next_handle: u64,
}

impl Driver {
    fn allocate(&mut self) -> AnimationHandle {
        self.next_handle += 1;
        AnimationHandle(self.next_handle)
    }

    /// Release every channel held by `handle`. Returns its entry if it is
    /// not currently being advanced.
    fn release(&mut self, handle: AnimationHandle) -> Option<ActiveAnimation> {
        self.owners.retain(|_, owner| *owner != handle);
        let index = self.active.iter().position(|a| a.handle == handle)?;
        Some(self.active.remove(index))
    }

    fn owns_all(&self, animation: &ActiveAnimation) -> bool {
        animation
            .drives
            .iter()
            .all(|value| self.owners.get(value) == Some(&animation.handle))
    }
}

thread_local! {
    static DRIVER: RefCell<Driver> = RefCell::new(Driver::default());
}

fn with_driver<R>(f: impl FnOnce(&mut Driver) -> R) -> R {
    DRIVER.with(|driver| f(&mut driver.borrow_mut()))
}

fn notify(callbacks: Vec<(Completion, bool)>) {
    for (callback, finished) in callbacks {
        callback(finished);
    }
}

/// Start running `animation`.
pub fn start(animation: Animation) -> AnimationHandle {
    start_inner(animation, None)
}

/// Start running `animation` and call `on_complete` when it ends.
pub fn start_with_callback(
    animation: Animation,
    on_complete: impl FnOnce(bool) + 'static,
) -> AnimationHandle {
    start_inner(animation, Some(Box::new(on_complete)))
}

fn start_inner(animation: Animation, on_complete: Option<Completion>) -> AnimationHandle {
    let drives = animation.driven_values();
    let runner = animation.runner();

    let (handle, superseded) = with_driver(|driver| {
        let handle = driver.allocate();

        let previous: Vec<AnimationHandle> = drives
            .iter()
            .filter_map(|value| driver.owners.get(value).copied())
            .collect();
        let mut superseded = Vec::new();
        for old in previous {
            if let Some(entry) = driver.release(old) {
                superseded.push(entry);
            }
        }

        for value in &drives {
            driver.owners.insert(*value, handle);
        }
        driver.active.push(ActiveAnimation {
            handle,
            runner,
            drives,
            on_complete,
        });
        (handle, superseded)
    });

    log::trace!(
        "animation {:?} started, superseding {}",
        handle,
        superseded.len()
    );
    notify(
        superseded
            .into_iter()
            .filter_map(|entry| entry.on_complete.map(|cb| (cb, false)))
            .collect(),
    );
    request_frame();
    handle
}

/// Stop an animation where it is. Returns false if it had already ended.
pub fn stop(handle: AnimationHandle) -> bool {
    let (was_running, entry) = with_driver(|driver| {
        let was_running = driver.owners.values().any(|owner| *owner == handle)
            || driver.active.iter().any(|a| a.handle == handle);
        (was_running, driver.release(handle))
    });
    if let Some(callback) = entry.and_then(|e| e.on_complete) {
        callback(false);
    }
    was_running
}

/// Stop whatever animations drive any of `values`.
pub fn stop_driving(values: &[ValueId]) {
    let handles: Vec<AnimationHandle> = with_driver(|driver| {
        values
            .iter()
            .filter_map(|value| driver.owners.get(value).copied())
            .collect()
    });
    for handle in handles {
        stop(handle);
    }
}

/// Whether some running animation writes to `value`.
pub fn is_driving(value: ValueId) -> bool {
    with_driver(|driver| driver.owners.contains_key(&value))
}

pub fn is_running(handle: AnimationHandle) -> bool {
    with_driver(|driver| {
        driver.owners.values().any(|owner| *owner == handle)
            || driver.active.iter().any(|a| a.handle == handle)
    })
}

/// Number of animations currently running.
pub fn active_count() -> usize {
    with_driver(|driver| driver.active.len())
}

/// Advance every running animation by `dt`. Returns whether any are still
/// running afterwards.
pub fn tick(dt: Duration) -> bool {
    let dt_ms = dt.as_micros() as f32 / 1000.0;
    let handles: Vec<AnimationHandle> =
        with_driver(|driver| driver.active.iter().map(|a| a.handle).collect());

    let mut finished = Vec::new();
    for handle in handles {
        let Some(mut entry) = with_driver(|driver| {
            let index = driver.active.iter().position(|a| a.handle == handle)?;
            Some(driver.active.remove(index))
        }) else {
            continue;
        };

        let step = entry.runner.advance(dt_ms);

        let ended = with_driver(|driver| {
            if !driver.owns_all(&entry) {
                // Stopped or superseded while advancing.
                driver.release(entry.handle);
                return Some((entry, false));
            }
            match step {
                Step::Running => {
                    driver.active.push(entry);
                    None
                }
                Step::Done { .. } => {
                    driver.release(entry.handle);
                    Some((entry, true))
                }
            }
        });

        if let Some((entry, completed)) = ended {
            log::trace!("animation {:?} ended (finished: {})", entry.handle, completed);
            if let Some(callback) = entry.on_complete {
                finished.push((callback, completed));
            }
        }
    }

    notify(finished);

    let running = with_driver(|driver| !driver.active.is_empty());
    if running {
        request_frame();
    }
    running
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::animation::{AnimatedValue, SpringConfig, TimingFunction};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tick_runs_to_completion_and_reports_finished() {
        let pop = AnimatedValue::new(0.5);
        let result = Rc::new(Cell::new(None));

        let seen = result.clone();
        let handle = start_with_callback(Animation::timing(&pop, 1.0, ms(100)), move |done| {
            seen.set(Some(done))
        });

        assert!(is_running(handle));
        assert!(tick(ms(50)));
        assert!(result.get().is_none());
        assert!(!tick(ms(50)));
        assert_eq!(result.get(), Some(true));
        assert_eq!(pop.get_untracked(), 1.0);
        assert!(!is_driving(pop.id()));
    }

    #[test]
    fn test_new_animation_supersedes_old_one() {
        let flip = AnimatedValue::new(0.0);
        let first = Rc::new(Cell::new(None));

        let seen = first.clone();
        let a = start_with_callback(
            Animation::spring(&flip, 180.0, SpringConfig::FLIP),
            move |done| seen.set(Some(done)),
        );
        tick(ms(200));
        let mid = flip.get_untracked();
        assert!(mid > 0.0 && mid < 180.0);

        let b = start(Animation::spring(&flip, 0.0, SpringConfig::FLIP));
        assert_eq!(first.get(), Some(false));
        assert!(!is_running(a));
        assert!(is_running(b));
        assert_eq!(active_count(), 1);

        // The new spring starts from the live value and carries its velocity.
        tick(ms(1));
        assert!(flip.get_untracked() > mid);

        tick(ms(4000));
        assert_eq!(flip.get_untracked(), 0.0);
    }

    #[test]
    fn test_stop_leaves_value_in_place() {
        let slide = AnimatedValue::new(0.0);
        let handle = start(
            Animation::timing(&slide, 1.0, ms(100)).easing(TimingFunction::Linear),
        );
        tick(ms(30));
        assert!(stop(handle));
        assert!(!stop(handle));
        tick(ms(100));
        assert!((slide.get_untracked() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_callback_can_chain_next_animation() {
        let pop = AnimatedValue::new(0.5);
        let slide = AnimatedValue::new(0.0);

        let next = slide.clone();
        start_with_callback(Animation::timing(&pop, 1.0, ms(100)), move |done| {
            if done {
                start(Animation::timing(&next, 1.0, ms(100)));
            }
        });

        tick(ms(100));
        assert!(is_driving(slide.id()));
        tick(ms(100));
        assert_eq!(slide.get_untracked(), 1.0);
    }

    #[test]
    fn test_listener_superseding_inflight_animation() {
        let flip = AnimatedValue::new(0.0);
        let reverse = Rc::new(RefCell::new(None));

        let target = flip.clone();
        let slot = reverse.clone();
        flip.add_listener(move |v| {
            if v > 10.0 && slot.borrow().is_none() {
                *slot.borrow_mut() = Some(start(Animation::spring(
                    &target,
                    0.0,
                    SpringConfig::FLIP,
                )));
            }
        });

        let forward = start(Animation::spring(&flip, 180.0, SpringConfig::FLIP));
        tick(ms(100));

        assert!(!is_running(forward));
        let reverse_handle = reverse.borrow().expect("reverse started");
        assert!(is_running(reverse_handle));
        assert_eq!(active_count(), 1);
    }

    #[test]
    fn test_stop_driving_by_value() {
        let pop = AnimatedValue::new(0.5);
        let slide = AnimatedValue::new(0.0);
        start(Animation::sequence([
            Animation::timing(&pop, 1.0, ms(100)),
            Animation::timing(&slide, 1.0, ms(100)),
        ]));
        assert!(is_driving(slide.id()));

        stop_driving(&[pop.id()]);
        assert!(!is_driving(slide.id()));
        assert_eq!(active_count(), 0);
    }
}
