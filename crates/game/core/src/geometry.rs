//! Quantized angles, cardinal directions and axis-aligned boxes.
//!
//! Screen space has `y` growing downwards. Angle index 0 points east and
//! indices grow counter-clockwise as seen on screen, so a quarter turn from
//! east points up (negative `y`).

use core::f32::consts::TAU;

pub use glam::Vec2;

use crate::config::GameConfig;

/// A heading quantized to one of `count` evenly spaced directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    index: u16,
    count: u16,
}

/// Rotational sense of a single angle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Shortest rotation from one angle to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// Already pointing at the target.
    Aligned,
    /// Turning this way is strictly shorter.
    Turn(Winding),
    /// Target is exactly behind; both windings are equally short.
    Opposite,
}

impl Angle {
    /// Creates an angle, wrapping `index` into `[0, count)`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn new(index: i32, count: u16) -> Self {
        assert!(count > 0, "angle count must be positive");
        Self {
            index: index.rem_euclid(i32::from(count)) as u16,
            count,
        }
    }

    /// Whether `count` is a supported quantization: a multiple of 4 from 4
    /// through [`GameConfig::MAX_ANGLE_COUNT`].
    pub const fn is_valid_count(count: u16) -> bool {
        count >= 4 && count <= GameConfig::MAX_ANGLE_COUNT && count % 4 == 0
    }

    pub const fn index(self) -> u16 {
        self.index
    }

    pub const fn count(self) -> u16 {
        self.count
    }

    pub fn radians(self) -> f32 {
        f32::from(self.index) * TAU / f32::from(self.count)
    }

    /// Unit vector in screen space.
    pub fn to_vector(self) -> Vec2 {
        let radians = self.radians();
        Vec2::new(radians.cos(), -radians.sin())
    }

    /// Nearest quantized angle to `vector`. A zero vector maps to index 0.
    pub fn from_vector(vector: Vec2, count: u16) -> Self {
        if vector == Vec2::ZERO {
            return Self::new(0, count);
        }
        let theta = (-vector.y).atan2(vector.x);
        let step = TAU / f32::from(count);
        Self::new((theta / step).round() as i32, count)
    }

    /// Re-expresses this angle with a different quantization.
    #[must_use]
    pub fn requantize(self, count: u16) -> Self {
        if count == self.count {
            return self;
        }
        Self::from_vector(self.to_vector(), count)
    }

    #[must_use]
    pub fn rotated(self, steps: i32) -> Self {
        Self::new(i32::from(self.index) + steps, self.count)
    }

    /// One quantum step in the given winding.
    #[must_use]
    pub fn step(self, winding: Winding) -> Self {
        match winding {
            Winding::CounterClockwise => self.rotated(1),
            Winding::Clockwise => self.rotated(-1),
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(i32::from(self.count / 2))
    }

    /// Shortest rotation from `self` to `target`.
    ///
    /// `target` is requantized to this angle's count first.
    pub fn rotation_toward(self, target: Angle) -> Rotation {
        let target = target.requantize(self.count);
        let count = self.count;
        let counter_clockwise = (target.index + count - self.index) % count;
        if counter_clockwise == 0 {
            Rotation::Aligned
        } else if counter_clockwise * 2 == count {
            Rotation::Opposite
        } else if counter_clockwise * 2 < count {
            Rotation::Turn(Winding::CounterClockwise)
        } else {
            Rotation::Turn(Winding::Clockwise)
        }
    }

    /// Nearest cardinal direction, computed from the index so exact
    /// diagonals resolve like [`Direction::from_vector`]: horizontal wins.
    pub fn direction(self) -> Direction {
        let count = u32::from(self.count);
        let eighths = u32::from(self.index) * 8;
        let (octant, rest) = (eighths / count, eighths % count);
        if rest == 0 && octant % 2 == 1 {
            return if matches!(octant, 3 | 5) { Direction::Left } else { Direction::Right };
        }
        match ((octant + 1) / 2) % 4 {
            0 => Direction::Right,
            1 => Direction::Up,
            2 => Direction::Left,
            _ => Direction::Down,
        }
    }
}

/// One of the four cardinal directions, used for facing and sprite selection.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Direction {
    /// Dominant axis of `vector`; horizontal wins ties, including ties
    /// blurred by rounding.
    pub fn from_vector(vector: Vec2) -> Self {
        const TIE_TOLERANCE: f32 = 1e-4;
        let (x, y) = (vector.x.abs(), vector.y.abs());
        if x >= y - TIE_TOLERANCE * x.max(y) {
            if vector.x >= 0.0 { Self::Right } else { Self::Left }
        } else if vector.y < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub const fn to_vector(self) -> Vec2 {
        match self {
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }

    /// The angle pointing this way at the given quantization.
    pub fn to_angle(self, count: u16) -> Angle {
        Angle::new(self as i32 * i32::from(count / 4), count)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
        }
    }
}

/// Axis-aligned box relative to an entity's position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionBox {
    /// Top-left corner relative to the entity position.
    pub offset: Vec2,
    pub size: Vec2,
}

impl CollisionBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Box of the given size centered on the entity position.
    pub const fn centered(width: f32, height: f32) -> Self {
        Self::new(-width / 2.0, -height / 2.0, width, height)
    }

    /// World-space rectangle when the entity stands at `position`.
    pub fn at(self, position: Vec2) -> Rect {
        let min = position + self.offset;
        Rect {
            min,
            max: min + self.size,
        }
    }
}

/// World-space axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn index_zero_points_east_and_quarter_turn_points_up() {
        assert_close(Angle::new(0, 8).to_vector(), Vec2::new(1.0, 0.0));
        assert_close(Angle::new(2, 8).to_vector(), Vec2::new(0.0, -1.0));
        assert_close(Angle::new(4, 8).to_vector(), Vec2::new(-1.0, 0.0));
        assert_close(Angle::new(6, 8).to_vector(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn new_wraps_negative_and_overflowing_indices() {
        assert_eq!(Angle::new(-1, 8).index(), 7);
        assert_eq!(Angle::new(17, 8).index(), 1);
    }

    #[test]
    fn from_vector_picks_nearest_quantum() {
        assert_eq!(Angle::from_vector(Vec2::new(1.0, -0.1), 8).index(), 0);
        assert_eq!(Angle::from_vector(Vec2::new(1.0, -1.0), 8).index(), 1);
        assert_eq!(Angle::from_vector(Vec2::new(0.0, 3.0), 16).index(), 12);
        assert_eq!(Angle::from_vector(Vec2::ZERO, 16).index(), 0);
    }

    #[test]
    fn rotation_toward_prefers_shorter_arc() {
        let east = Angle::new(0, 16);
        assert_eq!(east.rotation_toward(Angle::new(0, 16)), Rotation::Aligned);
        assert_eq!(
            east.rotation_toward(Angle::new(3, 16)),
            Rotation::Turn(Winding::CounterClockwise)
        );
        assert_eq!(
            east.rotation_toward(Angle::new(13, 16)),
            Rotation::Turn(Winding::Clockwise)
        );
        assert_eq!(east.rotation_toward(Angle::new(8, 16)), Rotation::Opposite);
    }

    #[test]
    fn step_moves_one_quantum() {
        let angle = Angle::new(0, 8);
        assert_eq!(angle.step(Winding::CounterClockwise).index(), 1);
        assert_eq!(angle.step(Winding::Clockwise).index(), 7);
        assert_eq!(angle.opposite().index(), 4);
    }

    #[test]
    fn valid_counts_are_multiples_of_four_up_to_the_maximum() {
        assert!(Angle::is_valid_count(4));
        assert!(Angle::is_valid_count(32));
        assert!(!Angle::is_valid_count(0));
        assert!(!Angle::is_valid_count(6));
        assert!(!Angle::is_valid_count(36));
    }

    #[test]
    fn directions_map_to_matching_angles() {
        assert_eq!(Direction::Up.to_angle(8).index(), 2);
        assert_eq!(Direction::Down.to_angle(16).index(), 12);
        assert_eq!(Angle::new(5, 8).direction(), Direction::Left);
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
    }

    #[test]
    fn diagonals_face_horizontally() {
        for count in [8, 16, 32] {
            for index in 0..count {
                let angle = Angle::new(index, count as u16);
                assert_eq!(
                    angle.direction(),
                    Direction::from_vector(angle.to_vector()),
                    "index {index} of {count}"
                );
            }
        }
        assert_eq!(Angle::new(1, 8).direction(), Direction::Right);
        assert_eq!(Angle::new(3, 8).direction(), Direction::Left);
        assert_eq!(Angle::new(7, 8).direction(), Direction::Right);
        assert_eq!(Angle::new(3, 16).direction(), Direction::Up);
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let a = CollisionBox::new(0.0, 0.0, 16.0, 16.0).at(Vec2::ZERO);
        let b = CollisionBox::new(0.0, 0.0, 16.0, 16.0).at(Vec2::new(16.0, 0.0));
        let c = CollisionBox::new(0.0, 0.0, 16.0, 16.0).at(Vec2::new(15.0, 4.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }
}
