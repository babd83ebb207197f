//! Bounded-turn homing.

use crate::env::RngOracle;
use crate::geometry::{Angle, Rotation, Vec2};

/// Rotates a heading at most one quantum toward the target.
///
/// When the target is exactly behind, the winding is chosen by a fair coin
/// flip from `rng`.
pub fn turn_toward(heading: Angle, from: Vec2, target: Vec2, rng: &mut dyn RngOracle) -> Angle {
    let wanted = Angle::from_vector(target - from, heading.count());
    match heading.rotation_toward(wanted) {
        Rotation::Aligned => heading,
        Rotation::Turn(winding) => heading.step(winding),
        Rotation::Opposite => {
            if rng.coin_flip() {
                heading.rotated(1)
            } else {
                heading.rotated(-1)
            }
        }
    }
}

/// Heading recomputation throttle for steering monsters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Homing {
    angle_duration: u32,
    timer: u32,
}

impl Homing {
    /// Turns at most once every `angle_duration` ticks.
    pub const fn new(angle_duration: u32) -> Self {
        Self {
            angle_duration,
            timer: 0,
        }
    }

    /// Makes the next [`Homing::update`] turn immediately.
    pub fn reset(&mut self) {
        self.timer = 0;
    }

    /// Advances one tick and returns the heading to use this tick.
    pub fn update(
        &mut self,
        heading: Angle,
        from: Vec2,
        target: Vec2,
        rng: &mut dyn RngOracle,
    ) -> Angle {
        if self.timer > 0 {
            self.timer -= 1;
            return heading;
        }
        self.timer = self.angle_duration.saturating_sub(1);
        turn_toward(heading, from, target, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, compute_seed};

    const EAST: Vec2 = Vec2::new(1.0, 0.0);

    #[test]
    fn aligned_heading_is_kept() {
        let mut rng = PcgRng::new(1);
        let heading = Angle::new(0, 8);
        assert_eq!(turn_toward(heading, Vec2::ZERO, EAST * 10.0, &mut rng), heading);
    }

    #[test]
    fn turns_one_step_along_the_shorter_arc() {
        let mut rng = PcgRng::new(1);
        let heading = Angle::new(0, 16);
        // Straight up is four steps counter-clockwise.
        let up = Vec2::new(0.0, -10.0);
        assert_eq!(turn_toward(heading, Vec2::ZERO, up, &mut rng).index(), 1);
        // Straight down is four steps clockwise.
        let down = Vec2::new(0.0, 10.0);
        assert_eq!(turn_toward(heading, Vec2::ZERO, down, &mut rng).index(), 15);
    }

    #[test]
    fn opposite_target_splits_evenly_and_reproducibly() {
        let heading = Angle::new(0, 8);
        let behind = Vec2::new(-10.0, 0.0);
        let pick = |seed| {
            let mut rng = PcgRng::new(compute_seed(seed, 1, 0));
            turn_toward(heading, Vec2::ZERO, behind, &mut rng).index()
        };

        let mut counter_clockwise = 0;
        for seed in 0..1000 {
            let index = pick(seed);
            assert!(index == 1 || index == 7, "unexpected index {index}");
            if index == 1 {
                counter_clockwise += 1;
            }
            assert_eq!(pick(seed), index);
        }
        assert!(
            (400..=600).contains(&counter_clockwise),
            "skewed tie break: {counter_clockwise}/1000"
        );
    }

    #[test]
    fn update_turns_once_per_angle_duration() {
        let mut rng = PcgRng::new(4);
        let mut homing = Homing::new(3);
        let target = Vec2::new(0.0, -10.0);
        let mut heading = Angle::new(0, 16);

        let mut history = Vec::new();
        for _ in 0..7 {
            heading = homing.update(heading, Vec2::ZERO, target, &mut rng);
            history.push(heading.index());
        }
        assert_eq!(history, vec![1, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn reset_forces_an_immediate_turn() {
        let mut rng = PcgRng::new(4);
        let mut homing = Homing::new(10);
        let target = Vec2::new(0.0, -10.0);
        let heading = homing.update(Angle::new(0, 8), Vec2::ZERO, target, &mut rng);
        assert_eq!(heading.index(), 1);

        homing.reset();
        assert_eq!(homing.update(heading, Vec2::ZERO, target, &mut rng).index(), 2);
    }
}
