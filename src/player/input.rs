use glam::Vec3;

use crate::constants::*;

/// One tick's movement input, captured by value from the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MovementIntent {
    pub const IDLE: MovementIntent = MovementIntent {
        forward: false,
        backward: false,
        left: false,
        right: false,
        jump: false,
    };

    pub fn has_direction(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Sum of the pressed directions: forward is -Z, right is +X. Not normalized.
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }
}

/// Catches horizontal motion that keeps going after input has stopped.
#[derive(Clone, Debug, Default)]
pub struct InputWatchdog {
    idle_seconds: f32,
    strikes: u32,
}

impl InputWatchdog {
    /// Feeds one tick. Returns `true` when horizontal velocity should be forced to zero.
    pub fn check(&mut self, intent: &MovementIntent, horizontal_speed: f32, dt: f32) -> bool {
        if intent.has_direction() {
            self.idle_seconds = 0.0;
            self.strikes = 0;
            return false;
        }

        self.idle_seconds += dt;
        // Strikes clear only on input.
        if self.idle_seconds <= WATCHDOG_IDLE_SECONDS || horizontal_speed <= DAMPING_SNAP_THRESHOLD {
            return false;
        }

        self.strikes += 1;
        if self.strikes < WATCHDOG_MAX_STRIKES {
            return false;
        }
        tracing::warn!(
            "Horizontal speed {:.3} persisted {:.2}s without input, stopping",
            horizontal_speed,
            self.idle_seconds
        );
        self.strikes = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_sum_without_normalizing() {
        let intent = MovementIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(intent.direction(), Vec3::new(1.0, 0.0, -1.0));

        let opposed = MovementIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        assert!(opposed.has_direction());
        assert_eq!(opposed.direction(), Vec3::ZERO);
        assert!(!MovementIntent::IDLE.with_jump(true).has_direction());
    }

    #[test]
    fn watchdog_fires_after_three_idle_strikes() {
        let mut watchdog = InputWatchdog::default();
        let idle = MovementIntent::IDLE;
        let dt = 0.25;

        for _ in 0..4 {
            assert!(!watchdog.check(&idle, 2.0, dt));
        }
        assert!(!watchdog.check(&idle, 2.0, dt));
        assert!(!watchdog.check(&idle, 2.0, dt));
        assert!(watchdog.check(&idle, 2.0, dt));
    }

    #[test]
    fn watchdog_strikes_survive_a_pause_at_rest() {
        let mut watchdog = InputWatchdog::default();
        let idle = MovementIntent::IDLE;
        for _ in 0..6 {
            assert!(!watchdog.check(&idle, 2.0, 0.25));
        }
        assert!(!watchdog.check(&idle, 0.0, 0.25));
        assert!(watchdog.check(&idle, 2.0, 0.25));
    }

    #[test]
    fn watchdog_resets_on_input() {
        let mut watchdog = InputWatchdog::default();
        let idle = MovementIntent::IDLE;
        for _ in 0..6 {
            watchdog.check(&idle, 2.0, 0.25);
        }

        let walking = MovementIntent {
            forward: true,
            ..Default::default()
        };
        assert!(!watchdog.check(&walking, 5.0, 0.25));
        for _ in 0..6 {
            assert!(!watchdog.check(&idle, 2.0, 0.25));
        }
        assert!(watchdog.check(&idle, 2.0, 0.25));
    }
}
