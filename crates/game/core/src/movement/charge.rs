//! Accelerating charge toward a fixed heading.

use crate::geometry::{Angle, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChargeMotion {
    heading: Vec2,
    speed: f32,
    acceleration: f32,
    max_speed: f32,
    remaining: u32,
}

impl ChargeMotion {
    /// Starts a charge along `heading` lasting `ticks` ticks.
    pub fn start(&mut self, heading: Angle, speed: f32, acceleration: f32, max_speed: f32, ticks: u32) {
        *self = Self {
            heading: heading.to_vector(),
            speed: speed.min(max_speed),
            acceleration,
            max_speed,
            remaining: ticks,
        };
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Ticks left before the charge runs out.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_spent(&self) -> bool {
        self.remaining == 0
    }

    /// Advances one tick and returns this tick's velocity.
    pub fn step(&mut self) -> Vec2 {
        self.remaining = self.remaining.saturating_sub(1);
        self.speed = (self.speed + self.acceleration).min(self.max_speed);
        self.heading * self.speed
    }
}

/// Where a body moving by `velocity` this tick first lands on a tile
/// center along its dominant axis, if it does so within the tick.
///
/// A body already sitting on a center does not count as reaching it.
pub fn grid_crossing(position: Vec2, velocity: Vec2, tile_size: f32) -> Option<Vec2> {
    let (from, delta) = if velocity.x.abs() >= velocity.y.abs() {
        (position.x, velocity.x)
    } else {
        (position.y, velocity.y)
    };
    if delta == 0.0 {
        return None;
    }

    let half = tile_size / 2.0;
    let cell = (from - half) / tile_size;
    let target = if delta > 0.0 {
        (cell.floor() + 1.0) * tile_size + half
    } else {
        (cell.ceil() - 1.0) * tile_size + half
    };

    let fraction = (target - from) / delta;
    (fraction <= 1.0).then(|| position + velocity * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_ramps_up_to_the_cap() {
        let mut charge = ChargeMotion::default();
        charge.start(Angle::new(0, 4), 1.0, 0.5, 2.0, 10);

        let speeds: Vec<f32> = (0..4).map(|_| charge.step().x).collect();
        assert_eq!(speeds, vec![1.5, 2.0, 2.0, 2.0]);
        assert_eq!(charge.remaining(), 6);
    }

    #[test]
    fn velocity_follows_the_heading() {
        let mut charge = ChargeMotion::default();
        charge.start(Angle::new(3, 4), 1.0, 0.0, 1.0, 5);
        let velocity = charge.step();
        assert!(velocity.x.abs() < 1e-6);
        assert!((velocity.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn charge_is_spent_after_its_ticks() {
        let mut charge = ChargeMotion::default();
        charge.start(Angle::new(0, 4), 1.0, 0.0, 1.0, 2);
        charge.step();
        assert!(!charge.is_spent());
        charge.step();
        assert!(charge.is_spent());
    }

    #[test]
    fn grid_crossing_snaps_to_the_next_tile_center() {
        // Centers of 16px tiles lie at 8, 24, 40, ...
        let hit = grid_crossing(Vec2::new(20.0, 8.0), Vec2::new(5.0, 0.0), 16.0);
        assert_eq!(hit, Some(Vec2::new(24.0, 8.0)));

        let hit = grid_crossing(Vec2::new(20.0, 30.0), Vec2::new(0.0, -8.0), 16.0);
        assert_eq!(hit, Some(Vec2::new(20.0, 24.0)));

        assert_eq!(grid_crossing(Vec2::new(10.0, 8.0), Vec2::new(3.0, 0.0), 16.0), None);
    }

    #[test]
    fn leaving_a_center_does_not_count() {
        assert_eq!(grid_crossing(Vec2::new(24.0, 8.0), Vec2::new(2.0, 0.0), 16.0), None);
        assert_eq!(grid_crossing(Vec2::ZERO, Vec2::ZERO, 16.0), None);
    }
}
