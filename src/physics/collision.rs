use glam::Vec3;

use crate::constants::*;
use crate::world::store::World;

/// Vertical cylinder standing on `position` (feet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
}

impl Capsule {
    pub const fn new(radius: f32, height: f32) -> Self {
        Capsule { radius, height }
    }
}

/// Result of one resolver step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionOutcome {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Feet touched a voxel top or the world floor this step.
    pub grounded: bool,
    /// Axes whose position was set by a contact instead of integrated.
    pub snapped: [bool; 3],
}

/// Per-axis swept collision of a capsule against the voxel grid.
///
/// Axes are resolved in a fixed order: ground, ceiling, X, Z. Each axis sees
/// the corrections made by the axes before it. Positions are in world units;
/// voxel cells are `tile_size` wide.
pub struct CollisionResolver<'w> {
    world: &'w World,
    tile: f32,
}

impl<'w> CollisionResolver<'w> {
    pub fn new(world: &'w World) -> Self {
        CollisionResolver {
            world,
            tile: world.tile_size(),
        }
    }

    /// World units to voxel units. Values within `GRID_SNAP_EPSILON` of a cell
    /// boundary land on it, so a snapped surface maps back to its own layer.
    fn to_grid(&self, v: f32) -> f32 {
        let u = v / self.tile;
        let nearest = u.round();
        if (u - nearest).abs() < GRID_SNAP_EPSILON { nearest } else { u }
    }

    fn cell(&self, v: f32) -> i32 {
        self.to_grid(v).floor() as i32
    }

    fn surface(&self, cell: i32) -> f32 {
        cell as f32 * self.tile
    }

    /// Layers below the world floor are open air.
    fn solid(&self, x: i32, y: i32, z: i32) -> bool {
        y >= 0 && self.world.is_solid(x, y, z)
    }

    /// Resolves one step and integrates every axis that was not snapped.
    pub fn step(
        &self,
        capsule: &Capsule,
        position: Vec3,
        velocity: Vec3,
        restitution: f32,
        dt: f32,
    ) -> CollisionOutcome {
        let mut out = CollisionOutcome {
            position,
            velocity,
            grounded: false,
            snapped: [false; 3],
        };

        if self.resolve_ground(&mut out, restitution, dt) {
            out.grounded = true;
            out.snapped[1] = true;
        } else if self.resolve_ceiling(capsule, &mut out, dt) {
            out.snapped[1] = true;
        }
        out.snapped[0] = self.resolve_horizontal(0, capsule, &mut out, dt);
        out.snapped[2] = self.resolve_horizontal(2, capsule, &mut out, dt);

        for axis in 0..3 {
            if !out.snapped[axis] {
                out.position[axis] += out.velocity[axis] * dt;
            }
        }

        if out.position.y < 0.0 {
            out.position.y = 0.0;
            if out.velocity.y < 0.0 {
                out.velocity.y = 0.0;
            }
            out.grounded = true;
        }

        out
    }

    /// Sweeps the feet from the layer under the current position down to the
    /// layer the predicted position lands in. The first solid layer wins.
    fn resolve_ground(&self, out: &mut CollisionOutcome, restitution: f32, dt: f32) -> bool {
        if out.velocity.y > 0.0 {
            return false;
        }
        let predicted = out.position.y + out.velocity.y * dt;
        let column_x = self.cell(out.position.x);
        let column_z = self.cell(out.position.z);
        let below = self.cell(out.position.y).saturating_sub(1);
        // Lowest layer whose top surface the predicted feet are at or under.
        let lowest = (self.to_grid(predicted).ceil() as i32).saturating_sub(1).max(0);

        for layer in (lowest..=below).rev() {
            if !self.solid(column_x, layer, column_z) {
                continue;
            }
            out.position.y = self.surface(layer + 1);
            out.velocity.y *= -restitution;
            if out.velocity.y.abs() < BOUNCE_SNAP_THRESHOLD {
                out.velocity.y = 0.0;
            }
            tracing::trace!(
                "Ground contact at layer {} ({}, {}), rebound {:.3}",
                layer,
                column_x,
                column_z,
                out.velocity.y
            );
            return true;
        }
        false
    }

    /// Stops upward motion at the bottom face of the first solid voxel the
    /// capsule top would pass. No bounce, no upper world bound.
    fn resolve_ceiling(&self, capsule: &Capsule, out: &mut CollisionOutcome, dt: f32) -> bool {
        if out.velocity.y <= 0.0 {
            return false;
        }
        let top = out.position.y + capsule.height;
        let predicted_top = top + out.velocity.y * dt;
        let column_x = self.cell(out.position.x);
        let column_z = self.cell(out.position.z);
        let first = (self.to_grid(top).ceil() as i32).max(0);
        let last = self.cell(predicted_top);

        for layer in first..=last {
            if !self.solid(column_x, layer, column_z) {
                continue;
            }
            out.position.y = self.surface(layer) - capsule.height;
            out.velocity.y = 0.0;
            tracing::trace!("Ceiling contact at layer {} ({}, {})", layer, column_x, column_z);
            return true;
        }
        false
    }

    /// Scans the cells between the current and predicted leading edge along
    /// `axis` (0 = X, 2 = Z), nearest first, across every layer the capsule
    /// occupies. The first solid cell stops the axis.
    fn resolve_horizontal(
        &self,
        axis: usize,
        capsule: &Capsule,
        out: &mut CollisionOutcome,
        dt: f32,
    ) -> bool {
        let delta = out.velocity[axis] * dt;
        if delta.abs() < MOVEMENT_EPSILON {
            return false;
        }
        let other = if axis == 0 { 2 } else { 0 };
        let dir = delta.signum();
        let edge = out.position[axis] + dir * capsule.radius;
        let from = self.cell(edge);
        let to = self.cell(edge + delta);
        let column = self.cell(out.position[other]);

        let bottom = self.cell(out.position.y).max(0);
        let top = (self.to_grid(out.position.y + capsule.height) - LAYER_EPSILON).floor() as i32;

        let step = if dir > 0.0 { 1 } else { -1 };
        let mut cell = from;
        loop {
            let blocked = (bottom..=top).any(|layer| {
                let (x, z) = if axis == 0 { (cell, column) } else { (column, cell) };
                self.solid(x, layer, z)
            });
            if blocked {
                out.position[axis] = if dir > 0.0 {
                    self.surface(cell) - capsule.radius
                } else {
                    self.surface(cell.saturating_add(1)) + capsule.radius
                };
                out.velocity[axis] = 0.0;
                tracing::trace!("Wall contact on axis {} at cell {}", axis, cell);
                return true;
            }
            if cell == to {
                return false;
            }
            cell = cell.saturating_add(step);
        }
    }
}
