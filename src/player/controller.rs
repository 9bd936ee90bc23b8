use glam::Vec3;

use crate::constants::*;
use crate::physics::collision::CollisionResolver;
use crate::player::actor::Actor;
use crate::player::input::{InputWatchdog, MovementIntent};
use crate::utils::settings::ActorSettings;
use crate::world::store::World;

/// How an actor turns the tick's intent into velocity before gravity and collision run.
pub trait Steering {
    fn steer(&mut self, actor: &mut Actor, intent: &MovementIntent, dt: f32);
}

/// Player-driven steering: velocity is set directly from the pressed directions.
#[derive(Clone, Debug)]
pub struct AvatarSteering {
    pub speed: f32,
    pub jump_velocity: f32,
    watchdog: InputWatchdog,
}

impl AvatarSteering {
    pub fn new(speed: f32, jump_velocity: f32) -> Self {
        AvatarSteering {
            speed,
            jump_velocity,
            watchdog: InputWatchdog::default(),
        }
    }
}

impl From<&ActorSettings> for AvatarSteering {
    fn from(settings: &ActorSettings) -> Self {
        AvatarSteering::new(settings.speed, settings.jump_velocity)
    }
}

fn damp(v: f32) -> f32 {
    let damped = v * HORIZONTAL_DAMPING;
    if damped.abs() < DAMPING_SNAP_THRESHOLD { 0.0 } else { damped }
}

impl Steering for AvatarSteering {
    fn steer(&mut self, actor: &mut Actor, intent: &MovementIntent, dt: f32) {
        if intent.has_direction() {
            let dir = intent.direction();
            actor.velocity.x = dir.x * self.speed;
            actor.velocity.z = dir.z * self.speed;
            if let Some(facing) = dir.try_normalize() {
                actor.facing = facing;
            }
        } else {
            actor.velocity.x = damp(actor.velocity.x);
            actor.velocity.z = damp(actor.velocity.z);
        }

        if self.watchdog.check(intent, actor.horizontal_speed(), dt) {
            actor.velocity.x = 0.0;
            actor.velocity.z = 0.0;
        }

        if intent.jump && actor.grounded {
            actor.velocity.y = self.jump_velocity;
            tracing::debug!("Jump from y={:.2}", actor.position.y);
        }
    }
}

/// Steering for actors that only fall, bounce and get pushed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveSteering;

impl Steering for PassiveSteering {
    fn steer(&mut self, _actor: &mut Actor, _intent: &MovementIntent, _dt: f32) {}
}

/// Drives one actor through steering, gravity and voxel collision each tick.
pub struct ActorController<S: Steering> {
    actor: Actor,
    steering: S,
}

pub type AvatarController = ActorController<AvatarSteering>;
pub type CreatureController = ActorController<PassiveSteering>;

impl<S: Steering> ActorController<S> {
    pub fn new(actor: Actor, steering: S) -> Self {
        ActorController { actor, steering }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    pub fn position(&self) -> Vec3 {
        self.actor.position
    }

    pub fn tick(&mut self, world: &World, intent: &MovementIntent, dt: f32) {
        self.steering.steer(&mut self.actor, intent, dt);

        let actor = &mut self.actor;
        actor.velocity.y = (actor.velocity.y - actor.gravity * dt).max(-TERMINAL_FALL_SPEED);

        let outcome = CollisionResolver::new(world).step(
            &actor.capsule,
            actor.position,
            actor.velocity,
            actor.restitution,
            dt,
        );
        actor.apply(outcome);
    }
}

impl AvatarController {
    pub fn avatar(spawn: Vec3, settings: &ActorSettings) -> Self {
        ActorController::new(Actor::new(spawn, settings), AvatarSteering::from(settings))
    }
}

impl CreatureController {
    pub fn creature(spawn: Vec3, settings: &ActorSettings) -> Self {
        ActorController::new(Actor::new(spawn, settings), PassiveSteering)
    }
}
