use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

pub type SignalId = usize;
pub type EffectId = usize;

/// Dependency graph between signals and the effects that read them.
#[derive(Default)]
pub struct Runtime {
    current_effect: Option<EffectId>,
    pending_effects: HashSet<EffectId>,
    effect_callbacks: Vec<Option<Box<dyn FnMut()>>>,
    effect_alive: Vec<bool>,
    effect_dependencies: Vec<HashSet<SignalId>>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    batch_depth: usize,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        self.signal_subscribers.push(HashSet::new());
        self.signal_subscribers.len() - 1
    }

    pub fn allocate_effect(&mut self, callback: Box<dyn FnMut()>) -> EffectId {
        self.effect_callbacks.push(Some(callback));
        self.effect_alive.push(true);
        self.effect_dependencies.push(HashSet::new());
        self.effect_callbacks.len() - 1
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        // Signals created on another thread are unknown to this runtime.
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effect_dependencies[effect_id].insert(signal_id);
        }
    }

    /// Queue every subscriber of `signal_id`. Returns true when the caller
    /// should flush (not inside a batch).
    pub fn notify_write(&mut self, signal_id: SignalId) -> bool {
        if signal_id >= self.signal_subscribers.len() {
            return false;
        }

        self.pending_effects
            .extend(self.signal_subscribers[signal_id].iter().copied());

        self.batch_depth == 0 && !self.pending_effects.is_empty()
    }

    fn begin_effect(
        &mut self,
        effect_id: EffectId,
    ) -> Option<(Box<dyn FnMut()>, Option<EffectId>)> {
        let old_deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in old_deps {
            self.signal_subscribers[signal_id].remove(&effect_id);
        }

        let callback = self.effect_callbacks[effect_id].take()?;
        let prev = self.current_effect.replace(effect_id);
        Some((callback, prev))
    }

    fn end_effect(
        &mut self,
        effect_id: EffectId,
        callback: Box<dyn FnMut()>,
        prev: Option<EffectId>,
    ) {
        self.current_effect = prev;
        if self.effect_alive[effect_id] {
            self.effect_callbacks[effect_id] = Some(callback);
        }
    }

    pub fn dispose_effect(&mut self, effect_id: EffectId) {
        if effect_id >= self.effect_alive.len() {
            return;
        }
        let deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in deps {
            if signal_id < self.signal_subscribers.len() {
                self.signal_subscribers[signal_id].remove(&effect_id);
            }
        }
        self.effect_alive[effect_id] = false;
        self.effect_callbacks[effect_id] = None;
        self.pending_effects.remove(&effect_id);
    }

    pub fn is_effect_alive(&self, effect_id: EffectId) -> bool {
        self.effect_alive.get(effect_id).copied().unwrap_or(false)
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Access the runtime if it is not already borrowed.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| rt.try_borrow_mut().ok().map(|mut runtime| f(&mut runtime)))
}

/// Run one effect with dependency tracking.
///
/// The callback runs outside the runtime borrow so it may read and write
/// signals freely.
pub fn run_effect(effect_id: EffectId) {
    let Some((mut callback, prev)) = with_runtime(|rt| rt.begin_effect(effect_id)) else {
        return;
    };
    callback();
    with_runtime(|rt| rt.end_effect(effect_id, callback, prev));
}

/// Run queued effects until the queue drains.
pub fn flush_effects() {
    loop {
        let pending: Vec<EffectId> = with_runtime(|rt| rt.pending_effects.drain().collect());
        if pending.is_empty() {
            break;
        }
        for effect_id in pending {
            run_effect(effect_id);
        }
    }
}

/// Defer effect execution until `f` returns.
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    let flush = with_runtime(|rt| {
        rt.batch_depth -= 1;
        rt.batch_depth == 0
    });
    if flush {
        flush_effects();
    }
    result
}
