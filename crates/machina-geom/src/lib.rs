//! Integer block geometry: relative offsets, quarter-turn rotations, and world positions.
#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Offset of a block relative to an anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockVector {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

impl BlockVector {
    pub const ZERO: BlockVector = BlockVector {
        dx: 0,
        dy: 0,
        dz: 0,
    };

    #[inline]
    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }

    /// Rotates around the y axis by the given number of quarter turns.
    /// One step maps +x onto +z (east onto south); y is preserved.
    #[inline]
    pub const fn rotated(self, rotation: BlockRotation) -> BlockVector {
        let (dx, dz) = match rotation {
            BlockRotation::North => (self.dx, self.dz),
            BlockRotation::East => (-self.dz, self.dx),
            BlockRotation::South => (-self.dx, -self.dz),
            BlockRotation::West => (self.dz, -self.dx),
        };
        BlockVector {
            dx,
            dy: self.dy,
            dz,
        }
    }
}

impl From<[i32; 3]> for BlockVector {
    #[inline]
    fn from(v: [i32; 3]) -> Self {
        BlockVector::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for BlockVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.dx, self.dy, self.dz)
    }
}

impl Add for BlockVector {
    type Output = BlockVector;
    #[inline]
    fn add(self, rhs: BlockVector) -> BlockVector {
        BlockVector::new(self.dx + rhs.dx, self.dy + rhs.dy, self.dz + rhs.dz)
    }
}

impl Sub for BlockVector {
    type Output = BlockVector;
    #[inline]
    fn sub(self, rhs: BlockVector) -> BlockVector {
        BlockVector::new(self.dx - rhs.dx, self.dy - rhs.dy, self.dz - rhs.dz)
    }
}

impl Neg for BlockVector {
    type Output = BlockVector;
    #[inline]
    fn neg(self) -> BlockVector {
        BlockVector::new(-self.dx, -self.dy, -self.dz)
    }
}

/// Pure function form of [`BlockVector::rotated`].
#[inline]
pub const fn rotate(v: BlockVector, rotation: BlockRotation) -> BlockVector {
    v.rotated(rotation)
}

/// One of the four cardinal yaw steps. `North` is the reference frame and rotates nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum BlockRotation {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl BlockRotation {
    pub const ALL: [BlockRotation; 4] = [
        BlockRotation::North,
        BlockRotation::East,
        BlockRotation::South,
        BlockRotation::West,
    ];

    /// Position in rotation tables; equals the number of quarter turns.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(i: usize) -> BlockRotation {
        Self::ALL[i % 4]
    }

    /// Rotation equal to applying `self` and then `other`.
    #[inline]
    pub const fn compose(self, other: BlockRotation) -> BlockRotation {
        Self::from_index(self.index() + other.index())
    }

    #[inline]
    pub const fn inverse(self) -> BlockRotation {
        Self::from_index(4 - self.index())
    }

    #[inline]
    pub const fn opposite(self) -> BlockRotation {
        self.compose(BlockRotation::South)
    }

    #[inline]
    pub const fn right(self) -> BlockRotation {
        self.compose(BlockRotation::East)
    }

    #[inline]
    pub const fn left(self) -> BlockRotation {
        self.compose(BlockRotation::West)
    }

    /// Snaps a player yaw in degrees to the nearest quarter turn. Uses the Minecraft
    /// convention: 0 faces south (+z) and is the `North` reference frame, 90 faces west
    /// (-x) and maps to `East`, 180 faces north, 270 faces east.
    pub fn from_yaw(yaw_deg: f32) -> BlockRotation {
        if !yaw_deg.is_finite() {
            return BlockRotation::North;
        }
        let steps = (yaw_deg.rem_euclid(360.0) / 90.0).round() as usize;
        Self::from_index(steps)
    }

    pub fn from_name(name: &str) -> Option<BlockRotation> {
        match name.to_ascii_lowercase().as_str() {
            "north" => Some(BlockRotation::North),
            "east" => Some(BlockRotation::East),
            "south" => Some(BlockRotation::South),
            "west" => Some(BlockRotation::West),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockRotation::North => "north",
            BlockRotation::East => "east",
            BlockRotation::South => "south",
            BlockRotation::West => "west",
        }
    }
}

impl fmt::Display for BlockRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute block position in a world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockLocation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockLocation {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position reached by walking `v` from this location.
    #[inline]
    pub const fn relative(self, v: BlockVector) -> BlockLocation {
        BlockLocation::new(self.x + v.dx, self.y + v.dy, self.z + v.dz)
    }

    /// Like [`Self::relative`], but `None` if any coordinate leaves the `i32` range.
    #[inline]
    pub const fn checked_relative(self, v: BlockVector) -> Option<BlockLocation> {
        let Some(x) = self.x.checked_add(v.dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(v.dy) else {
            return None;
        };
        let Some(z) = self.z.checked_add(v.dz) else {
            return None;
        };
        Some(BlockLocation::new(x, y, z))
    }

    #[inline]
    pub const fn offset_to(self, other: BlockLocation) -> BlockVector {
        BlockVector::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }
}

impl From<[i32; 3]> for BlockLocation {
    #[inline]
    fn from(v: [i32; 3]) -> Self {
        BlockLocation::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl Add<BlockVector> for BlockLocation {
    type Output = BlockLocation;
    #[inline]
    fn add(self, rhs: BlockVector) -> BlockLocation {
        self.relative(rhs)
    }
}

impl AddAssign<BlockVector> for BlockLocation {
    #[inline]
    fn add_assign(&mut self, rhs: BlockVector) {
        *self = self.relative(rhs);
    }
}

impl Sub<BlockVector> for BlockLocation {
    type Output = BlockLocation;
    #[inline]
    fn sub(self, rhs: BlockVector) -> BlockLocation {
        self.relative(-rhs)
    }
}

impl SubAssign<BlockVector> for BlockLocation {
    #[inline]
    fn sub_assign(&mut self, rhs: BlockVector) {
        *self = self.relative(-rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_vector() -> impl Strategy<Value = BlockVector> {
        (-1000i32..1000, -1000i32..1000, -1000i32..1000)
            .prop_map(|(dx, dy, dz)| BlockVector::new(dx, dy, dz))
    }

    proptest! {
        #[test]
        fn rotating_by_composition_matches_sequential(
            v in small_vector(),
            a in any::<BlockRotation>(),
            b in any::<BlockRotation>(),
        ) {
            prop_assert_eq!(v.rotated(a).rotated(b), v.rotated(a.compose(b)));
        }

        #[test]
        fn inverse_undoes_rotation(v in small_vector(), r in any::<BlockRotation>()) {
            prop_assert_eq!(v.rotated(r).rotated(r.inverse()), v);
        }

        #[test]
        fn location_round_trip(loc in any::<(i16, i16, i16)>(), v in small_vector()) {
            let at = BlockLocation::new(loc.0 as i32, loc.1 as i32, loc.2 as i32);
            prop_assert_eq!(at.offset_to(at + v), v);
            prop_assert_eq!((at + v) - v, at);
        }
    }

    #[test]
    fn yaw_snaps_to_quarter_turns() {
        assert_eq!(BlockRotation::from_yaw(0.0), BlockRotation::North);
        assert_eq!(BlockRotation::from_yaw(44.0), BlockRotation::North);
        assert_eq!(BlockRotation::from_yaw(46.0), BlockRotation::East);
        assert_eq!(BlockRotation::from_yaw(90.0), BlockRotation::East);
        assert_eq!(BlockRotation::from_yaw(270.0), BlockRotation::West);
        assert_eq!(BlockRotation::from_yaw(180.0), BlockRotation::South);
        assert_eq!(BlockRotation::from_yaw(-90.0), BlockRotation::West);
        assert_eq!(BlockRotation::from_yaw(359.0), BlockRotation::North);
        assert_eq!(BlockRotation::from_yaw(f32::NAN), BlockRotation::North);
    }

    #[test]
    fn checked_relative_stops_at_i32_edge() {
        let edge = BlockLocation::new(i32::MAX, 64, i32::MIN);
        assert_eq!(edge.checked_relative(BlockVector::new(1, 0, 0)), None);
        assert_eq!(edge.checked_relative(BlockVector::new(0, 0, -1)), None);
        assert_eq!(
            edge.checked_relative(BlockVector::new(-1, 1, 1)),
            Some(BlockLocation::new(i32::MAX - 1, 65, i32::MIN + 1))
        );
    }

    #[test]
    fn turning_helpers() {
        assert_eq!(BlockRotation::North.right(), BlockRotation::East);
        assert_eq!(BlockRotation::North.left(), BlockRotation::West);
        assert_eq!(BlockRotation::East.opposite(), BlockRotation::West);
        assert_eq!(BlockRotation::West.inverse(), BlockRotation::East);
        assert_eq!(BlockRotation::North.inverse(), BlockRotation::North);
    }
}
