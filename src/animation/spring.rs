/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Distance from the target below which the spring may come to rest
    pub rest_displacement: f32,
    /// Speed below which the spring may come to rest
    pub rest_speed: f32,
}

impl SpringConfig {
    /// Platform default spring (tension 40, friction 7).
    pub const DEFAULT: Self = Self::from_origami(40.0, 7.0);

    /// The card flip spring (tension 10, friction 8).
    pub const FLIP: Self = Self::from_origami(10.0, 8.0);

    /// Build a spring from origami-style tension and friction values.
    pub const fn from_origami(tension: f32, friction: f32) -> Self {
        Self {
            mass: 1.0,
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }

    /// Build a spring from physical parameters.
    pub const fn physical(mass: f32, stiffness: f32, damping: f32) -> Self {
        Self {
            mass,
            stiffness,
            damping,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }

    /// Damping ratio: below 1 the spring overshoots, above 1 it creeps in.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Integration step in seconds.
const STEP_SECS: f64 = 0.001;

/// Position and velocity of a spring in value units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringState {
    pub position: f32,
    pub velocity: f32,
}

impl SpringState {
    pub fn new(position: f32, velocity: f32) -> Self {
        Self { position, velocity }
    }

    /// Advance the simulation by `dt_secs` toward `target`.
    ///
    /// Integrates in fixed 1ms substeps (semi-implicit Euler) and stops
    /// early once at rest. Returns the unused time in seconds.
    ///
    /// The substeps run in f64: near the target, `velocity * h` drops below
    /// the f32 spacing of values like 180 and the position would stall
    /// just short of rest.
    pub fn step(&mut self, dt_secs: f32, target: f32, config: &SpringConfig) -> f32 {
        let target_f64 = f64::from(target);
        let stiffness = f64::from(config.stiffness);
        let damping = f64::from(config.damping);
        let mass = f64::from(config.mass);
        let mut position = f64::from(self.position);
        let mut velocity = f64::from(self.velocity);

        let mut remaining = f64::from(dt_secs.max(0.0));
        while remaining > 0.0 {
            if at_rest(position, velocity, target_f64, config) {
                self.position = target;
                self.velocity = 0.0;
                return remaining as f32;
            }

            let h = remaining.min(STEP_SECS);
            let spring_force = -stiffness * (position - target_f64);
            let damping_force = -damping * velocity;
            let acceleration = (spring_force + damping_force) / mass;

            velocity += acceleration * h;
            position += velocity * h;
            remaining -= h;
        }

        // A frame that no longer moves the stored position counts as rest
        // once inside the rest distance
        let stalled = position as f32 == self.position
            && (target_f64 - position).abs() <= f64::from(config.rest_displacement);
        if stalled || at_rest(position, velocity, target_f64, config) {
            self.position = target;
            self.velocity = 0.0;
        } else {
            self.position = position as f32;
            self.velocity = velocity as f32;
        }
        0.0
    }

    pub fn is_at_rest(&self, target: f32, config: &SpringConfig) -> bool {
        at_rest(
            f64::from(self.position),
            f64::from(self.velocity),
            f64::from(target),
            config,
        )
    }
}

fn at_rest(position: f64, velocity: f64, target: f64, config: &SpringConfig) -> bool {
    (target - position).abs() <= f64::from(config.rest_displacement)
        && velocity.abs() <= f64::from(config.rest_speed)
}
