//! Reactive ownership for mount / unmount cleanup.
//!
//! Everything a widget creates while mounting (effects, animation
//! subscriptions, cleanup callbacks) is registered with the owner that is
//! current at the time. Disposing the owner tears all of it down: child
//! owners first, then cleanups in reverse order, then effects.
//!
//! ```ignore
//! let (card, owner) = with_owner(|| {
//!     let handle = animation::start(pop_in);
//!     on_cleanup(move || animation::stop(handle));
//!     build_card()
//! });
//!
//! // on unmount
//! dispose_owner(owner);
//! ```

use std::cell::RefCell;

use super::runtime::{EffectId, with_runtime};

/// Unique identifier for an owner in the owner arena.
pub type OwnerId = usize;

#[derive(Default)]
struct Owner {
    effects: Vec<EffectId>,
    cleanups: Vec<Box<dyn FnOnce()>>,
    children: Vec<OwnerId>,
}

#[derive(Default)]
struct OwnerArena {
    owners: Vec<Option<Owner>>,
}

impl OwnerArena {
    fn allocate(&mut self) -> OwnerId {
        self.owners.push(Some(Owner::default()));
        self.owners.len() - 1
    }

    fn get_mut(&mut self, id: OwnerId) -> Option<&mut Owner> {
        self.owners.get_mut(id).and_then(|o| o.as_mut())
    }

    fn take(&mut self, id: OwnerId) -> Option<Owner> {
        self.owners.get_mut(id).and_then(|o| o.take())
    }
}

thread_local! {
    static CURRENT_OWNER: RefCell<Option<OwnerId>> = const { RefCell::new(None) };
    static OWNERS: RefCell<OwnerArena> = RefCell::new(OwnerArena::default());
}

/// Run `f` inside a fresh owner scope, nested under the current one.
pub fn with_owner<T>(f: impl FnOnce() -> T) -> (T, OwnerId) {
    let parent = current_owner();

    let owner_id = OWNERS.with(|owners| {
        let mut owners = owners.borrow_mut();
        let id = owners.allocate();
        if let Some(parent_owner) = parent.and_then(|p| owners.get_mut(p)) {
            parent_owner.children.push(id);
        }
        id
    });

    let prev_owner = CURRENT_OWNER.with(|current| current.replace(Some(owner_id)));
    let result = f();
    CURRENT_OWNER.with(|current| *current.borrow_mut() = prev_owner);

    (result, owner_id)
}

/// The owner scope currently being built, if any.
pub fn current_owner() -> Option<OwnerId> {
    CURRENT_OWNER.with(|current| *current.borrow())
}

/// Dispose an owner and everything registered with it. Disposing twice is a
/// no-op.
pub fn dispose_owner(id: OwnerId) {
    let Some(owner) = OWNERS.with(|owners| owners.borrow_mut().take(id)) else {
        return;
    };

    for child_id in owner.children {
        dispose_owner(child_id);
    }

    for cleanup in owner.cleanups.into_iter().rev() {
        cleanup();
    }

    for effect_id in owner.effects {
        with_runtime(|rt| rt.dispose_effect(effect_id));
    }
}

/// Register a callback to run when the current owner is disposed.
///
/// Outside an owner scope the callback is dropped without running.
pub fn on_cleanup(f: impl FnOnce() + 'static) {
    let Some(owner_id) = current_owner() else {
        log::trace!("on_cleanup called outside an owner scope");
        return;
    };
    OWNERS.with(|owners| {
        if let Some(owner) = owners.borrow_mut().get_mut(owner_id) {
            owner.cleanups.push(Box::new(f));
        }
    });
}

/// Attach an effect to the current owner. Returns whether an owner took it.
pub(crate) fn register_effect(id: EffectId) -> bool {
    let Some(owner_id) = current_owner() else {
        return false;
    };
    OWNERS.with(|owners| match owners.borrow_mut().get_mut(owner_id) {
        Some(owner) => {
            owner.effects.push(id);
            true
        }
        None => false,
    })
}
