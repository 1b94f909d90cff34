//! Declarative animation descriptions and the state machines that run them.
//!
//! An [`Animation`] is a plain description; the driver turns it into a
//! [`Runner`] when it starts. Start values are read from the live animated
//! value at the moment a stage begins, so an animation that supersedes
//! another continues from wherever the value currently is.

use std::time::Duration;

use super::spring::{SpringConfig, SpringState};
use super::timing::TimingFunction;
use super::value::{AnimatedValue, ValueId};

#[derive(Clone, Debug)]
pub enum Animation {
    /// Move `value` to `to` over a fixed duration.
    Timing {
        value: AnimatedValue,
        to: f32,
        duration_ms: f32,
        easing: TimingFunction,
    },
    /// Move `value` to `to` with spring physics.
    Spring {
        value: AnimatedValue,
        to: f32,
        config: SpringConfig,
    },
    /// Wait.
    Delay { duration_ms: f32 },
    /// Run stages one after another.
    Sequence(Vec<Animation>),
    /// Repeat `body`; `None` repeats forever.
    Loop {
        body: Box<Animation>,
        iterations: Option<u32>,
    },
}

impl Animation {
    pub fn timing(value: &AnimatedValue, to: f32, duration: Duration) -> Self {
        Animation::Timing {
            value: value.clone(),
            to,
            duration_ms: duration.as_micros() as f32 / 1000.0,
            easing: TimingFunction::default(),
        }
    }

    pub fn spring(value: &AnimatedValue, to: f32, config: SpringConfig) -> Self {
        Animation::Spring {
            value: value.clone(),
            to,
            config,
        }
    }

    pub fn delay(duration: Duration) -> Self {
        Animation::Delay {
            duration_ms: duration.as_micros() as f32 / 1000.0,
        }
    }

    pub fn sequence(stages: impl IntoIterator<Item = Animation>) -> Self {
        Animation::Sequence(stages.into_iter().collect())
    }

    /// Repeat forever.
    pub fn looped(self) -> Self {
        Animation::Loop {
            body: Box::new(self),
            iterations: None,
        }
    }

    /// Repeat `iterations` times.
    pub fn repeat(self, iterations: u32) -> Self {
        Animation::Loop {
            body: Box::new(self),
            iterations: Some(iterations),
        }
    }

    /// Replace the easing of a timing animation. Other kinds are unchanged.
    pub fn easing(mut self, timing: TimingFunction) -> Self {
        if let Animation::Timing { easing, .. } = &mut self {
            *easing = timing;
        }
        self
    }

    /// Every value this animation writes to, without duplicates.
    pub fn driven_values(&self) -> Vec<ValueId> {
        let mut ids = Vec::new();
        self.collect_values(&mut ids);
        ids
    }

    fn collect_values(&self, ids: &mut Vec<ValueId>) {
        match self {
            Animation::Timing { value, .. } | Animation::Spring { value, .. } => {
                if !ids.contains(&value.id()) {
                    ids.push(value.id());
                }
            }
            Animation::Delay { .. } => {}
            Animation::Sequence(stages) => {
                for stage in stages {
                    stage.collect_values(ids);
                }
            }
            Animation::Loop { body, .. } => body.collect_values(ids),
        }
    }

    pub(crate) fn runner(&self) -> Runner {
        match self {
            Animation::Timing {
                value,
                to,
                duration_ms,
                easing,
            } => Runner::Timing {
                value: value.clone(),
                from: None,
                to: *to,
                duration_ms: *duration_ms,
                easing: easing.clone(),
                elapsed_ms: 0.0,
            },
            Animation::Spring { value, to, config } => Runner::Spring {
                value: value.clone(),
                to: *to,
                config: *config,
                state: None,
            },
            Animation::Delay { duration_ms } => Runner::Delay {
                remaining_ms: *duration_ms,
            },
            Animation::Sequence(stages) => Runner::Sequence {
                stages: stages.clone(),
                index: 0,
                current: None,
            },
            Animation::Loop { body, iterations } => Runner::Loop {
                body: (**body).clone(),
                remaining: *iterations,
                current: None,
            },
        }
    }
}

/// Outcome of advancing a runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    Running,
    /// Finished, with the part of the frame it did not use.
    Done { leftover_ms: f32 },
}

pub(crate) enum Runner {
    Timing {
        value: AnimatedValue,
        from: Option<f32>,
        to: f32,
        duration_ms: f32,
        easing: TimingFunction,
        elapsed_ms: f32,
    },
    Spring {
        value: AnimatedValue,
        to: f32,
        config: SpringConfig,
        state: Option<SpringState>,
    },
    Delay {
        remaining_ms: f32,
    },
    Sequence {
        stages: Vec<Animation>,
        index: usize,
        current: Option<Box<Runner>>,
    },
    Loop {
        body: Animation,
        remaining: Option<u32>,
        current: Option<Box<Runner>>,
    },
}

impl Runner {
    pub(crate) fn advance(&mut self, dt_ms: f32) -> Step {
        match self {
            Runner::Timing {
                value,
                from,
                to,
                duration_ms,
                easing,
                elapsed_ms,
            } => {
                let start = *from.get_or_insert_with(|| {
                    value.set_velocity(0.0);
                    value.get_untracked()
                });
                *elapsed_ms += dt_ms;
                if *duration_ms <= 0.0 || *elapsed_ms >= *duration_ms {
                    value.write(*to);
                    return Step::Done {
                        leftover_ms: (*elapsed_ms - duration_ms.max(0.0)).max(0.0),
                    };
                }
                let t = *elapsed_ms / *duration_ms;
                value.write(start + (*to - start) * easing.evaluate(t));
                Step::Running
            }
            Runner::Spring {
                value,
                to,
                config,
                state,
            } => {
                let spring = state.get_or_insert_with(|| {
                    SpringState::new(value.get_untracked(), value.velocity())
                });
                let leftover_secs = spring.step(dt_ms / 1000.0, *to, config);
                value.set_velocity(spring.velocity);
                value.write(spring.position);
                if spring.is_at_rest(*to, config) {
                    Step::Done {
                        leftover_ms: leftover_secs * 1000.0,
                    }
                } else {
                    Step::Running
                }
            }
            Runner::Delay { remaining_ms } => {
                if dt_ms >= *remaining_ms {
                    let leftover_ms = dt_ms - *remaining_ms;
                    *remaining_ms = 0.0;
                    Step::Done { leftover_ms }
                } else {
                    *remaining_ms -= dt_ms;
                    Step::Running
                }
            }
            Runner::Sequence {
                stages,
                index,
                current,
            } => {
                let mut dt = dt_ms;
                loop {
                    if current.is_none() {
                        match stages.get(*index) {
                            Some(stage) => *current = Some(Box::new(stage.runner())),
                            None => return Step::Done { leftover_ms: dt },
                        }
                    }
                    let step = match current.as_mut() {
                        Some(runner) => runner.advance(dt),
                        None => return Step::Done { leftover_ms: dt },
                    };
                    match step {
                        Step::Running => return Step::Running,
                        Step::Done { leftover_ms } => {
                            *current = None;
                            *index += 1;
                            dt = leftover_ms;
                        }
                    }
                }
            }
            Runner::Loop {
                body,
                remaining,
                current,
            } => {
                let mut dt = dt_ms;
                loop {
                    if current.is_none() {
                        if *remaining == Some(0) {
                            return Step::Done { leftover_ms: dt };
                        }
                        *current = Some(Box::new(body.runner()));
                    }
                    let step = match current.as_mut() {
                        Some(runner) => runner.advance(dt),
                        None => return Step::Done { leftover_ms: dt },
                    };
                    match step {
                        Step::Running => return Step::Running,
                        Step::Done { leftover_ms } => {
                            *current = None;
                            if let Some(n) = remaining.as_mut() {
                                *n -= 1;
                            }
                            // A body that takes no time would spin forever.
                            if leftover_ms >= dt && remaining.is_none() {
                                return Step::Running;
                            }
                            dt = leftover_ms;
                        }
                    }
                }
            }
        }
    }
}
