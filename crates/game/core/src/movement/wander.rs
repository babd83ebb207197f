//! Angle-quantized wandering with obstacle lookahead.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::config::GameConfig;
use crate::env::{Footprint, PhysicsOracle, World};
use crate::geometry::Angle;

/// Move/stop cycle of a wandering monster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wanderer {
    moving: bool,
    timer: u32,
}

impl Wanderer {
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Ticks left in the current leg.
    pub fn remaining(&self) -> u32 {
        self.timer
    }

    pub fn start_moving(&mut self, ticks: u32) {
        self.moving = true;
        self.timer = ticks;
    }

    pub fn stop(&mut self, ticks: u32) {
        self.moving = false;
        self.timer = ticks;
    }

    /// Counts down one tick. Returns true when the current leg is over.
    pub fn tick(&mut self) -> bool {
        self.timer = self.timer.saturating_sub(1);
        self.timer == 0
    }
}

/// Tuning for [`choose_wander_angle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WanderParams {
    /// Pixels per tick the monster will move at.
    pub speed: f32,
    /// Percent chance to head for the player when that way is open.
    pub face_player_chance: u8,
    /// Multiple of one tick's displacement checked for obstacles.
    pub lookahead: f32,
}

/// Whether moving one lookahead step along `angle` stays clear of solids,
/// room edges, hazard tiles for monsters that avoid them and ledges for
/// walkers.
pub fn is_heading_clear<P>(physics: &P, footprint: &Footprint, angle: Angle, params: &WanderParams) -> bool
where
    P: PhysicsOracle + ?Sized,
{
    let ahead = footprint.position + angle.to_vector() * (params.speed * params.lookahead);
    !physics.is_footprint_blocked(footprint, ahead)
}

/// Picks a new heading for a wandering monster.
///
/// With `face_player_chance` percent probability the heading toward the
/// player is taken when it is clear. Otherwise a heading is drawn uniformly
/// from every clear candidate. When no candidate is clear the monster is
/// boxed in and `current` is rotated by a random number of steps instead.
///
/// Candidates use the quantization of `current`.
pub fn choose_wander_angle(
    world: &mut World,
    footprint: &Footprint,
    current: Angle,
    params: &WanderParams,
) -> Angle {
    let count = current.count();

    if params.face_player_chance > 0 && world.rng().chance(params.face_player_chance) {
        if let Some(player) = world.player() {
            let toward = Angle::from_vector(player.center - footprint.position, count);
            if is_heading_clear(&*world, footprint, toward, params) {
                return toward;
            }
        }
    }

    let mut open: ArrayVec<Angle, { GameConfig::MAX_WANDER_CANDIDATES }> = ArrayVec::new();
    for index in 0..i32::from(count) {
        let angle = Angle::new(index, count);
        if is_heading_clear(&*world, footprint, angle, params) {
            open.push(angle);
        }
    }

    if open.is_empty() {
        let fallback = current.rotated(world.rng().index(usize::from(count)) as i32);
        debug!(
            target: "movement",
            x = footprint.position.x,
            y = footprint.position.y,
            angle = fallback.index(),
            "no clear heading, wandering blind"
        );
        return fallback;
    }

    open[world.rng().index(open.len())]
}
