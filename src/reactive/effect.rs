use super::owner::register_effect;
use super::runtime::{EffectId, run_effect, with_runtime};

/// A side effect that re-runs whenever a signal it read changes.
///
/// Inside an owner scope the owner disposes the effect; otherwise dropping
/// the handle does.
pub struct Effect {
    id: EffectId,
    owned: bool,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let id = with_runtime(|rt| rt.allocate_effect(Box::new(f)));
        let owned = register_effect(id);
        run_effect(id);
        Self { id, owned }
    }

    pub fn is_alive(&self) -> bool {
        with_runtime(|rt| rt.is_effect_alive(self.id))
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        if !self.owned {
            with_runtime(|rt| rt.dispose_effect(self.id));
        }
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}
