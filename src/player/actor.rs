use glam::Vec3;

use crate::physics::collision::{Capsule, CollisionOutcome};
use crate::utils::settings::ActorSettings;

/// Physical state of one capsule-shaped actor. Owned by its controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    /// Capsule base (feet).
    pub position: Vec3,
    pub velocity: Vec3,
    pub capsule: Capsule,
    pub gravity: f32,
    pub restitution: f32,
    /// Contact state from the last tick.
    pub grounded: bool,
    /// Last commanded horizontal direction, unit length.
    pub facing: Vec3,
}

impl Actor {
    pub fn new(position: Vec3, settings: &ActorSettings) -> Self {
        Actor {
            position,
            velocity: Vec3::ZERO,
            capsule: Capsule::new(settings.radius, settings.height),
            gravity: settings.gravity,
            restitution: settings.ground_restitution,
            grounded: false,
            facing: Vec3::NEG_Z,
        }
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.z)
    }

    pub(crate) fn apply(&mut self, outcome: CollisionOutcome) {
        self.position = outcome.position;
        self.velocity = outcome.velocity;
        self.grounded = outcome.grounded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_actor_takes_capsule_from_settings() {
        let settings = ActorSettings::creature();
        let actor = Actor::new(Vec3::new(1.0, 2.0, 3.0), &settings);
        assert_eq!(actor.capsule, Capsule::new(0.4, 1.8));
        assert_eq!(actor.restitution, 0.4);
        assert!(!actor.grounded);
        assert_eq!(actor.velocity, Vec3::ZERO);
    }

    #[test]
    fn horizontal_speed_ignores_vertical() {
        let mut actor = Actor::new(Vec3::ZERO, &ActorSettings::default());
        actor.velocity = Vec3::new(3.0, -9.0, 4.0);
        assert_eq!(actor.horizontal_speed(), 5.0);
    }
}
