use crate::{
    geometry::{Face, GeometryError, Piece, clockwise_neighbors, ring_position},
    state::{CubeState, slot_of},
};

/// Every listed position holds its own piece, in any orientation.
pub fn is_placed<P: Piece>(state: &CubeState, positions: &[P]) -> bool {
    positions
        .iter()
        .all(|&key| P::slots(state)[slot_of(key)].same_faces(&key))
}

/// Every listed position holds its own piece in its home orientation.
pub fn is_strictly_placed<P: Piece>(state: &CubeState, positions: &[P]) -> bool {
    positions
        .iter()
        .all(|&key| P::slots(state)[slot_of(key)] == key)
}

/// A face named relative to the way the cube is being held.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    U,
    F,
    R,
    D,
    L,
    B,
}

/// An assignment of the six roles to concrete faces, fixed by choosing
/// which face is up and which is in front.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RoleFrame {
    up: Face,
    front: Face,
    right: Face,
}

impl RoleFrame {
    /// Hold the cube with `up` on top and `front` facing you.
    ///
    /// # Errors
    ///
    /// `front` must border `up`.
    pub fn new(up: Face, front: Face) -> Result<Self, GeometryError> {
        let at = ring_position(up, front).ok_or(GeometryError::NotAdjacent(up, front))?;
        Ok(RoleFrame {
            up,
            front,
            right: clockwise_neighbors(up)[(at + 3) % 4],
        })
    }

    /// The frame in which a corner key reads as its `U`, `R` and `F` faces,
    /// in that order.
    ///
    /// # Errors
    ///
    /// Fails only for tuples that are not corners.
    pub fn from_corner(corner: [Face; 3]) -> Result<Self, GeometryError> {
        Self::new(corner[0], corner[2])
    }

    #[must_use]
    pub fn face(&self, role: Role) -> Face {
        match role {
            Role::U => self.up,
            Role::F => self.front,
            Role::R => self.right,
            Role::D => self.up.opposite(),
            Role::L => self.right.opposite(),
            Role::B => self.front.opposite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CORNERS, Face::*};

    #[test]
    fn frames_cover_all_six_faces() {
        for up in Face::ALL {
            for front in clockwise_neighbors(up) {
                let frame = RoleFrame::new(up, front).unwrap();
                let mut faces = [Role::U, Role::F, Role::R, Role::D, Role::L, Role::B]
                    .map(|role| frame.face(role));
                faces.sort();
                assert_eq!(faces, Face::ALL);
                assert_eq!(frame.face(Role::R).opposite(), frame.face(Role::L));
                // Right follows front in the ring, running anticlockwise
                let ring = clockwise_neighbors(up);
                assert_eq!(ring[(ring_position(up, frame.face(Role::R)).unwrap() + 1) % 4], front);
            }
        }
    }

    #[test]
    fn corners_read_as_up_right_front() {
        for corner in CORNERS {
            let frame = RoleFrame::from_corner(corner).unwrap();
            assert_eq!(
                [Role::U, Role::R, Role::F].map(|role| frame.face(role)),
                corner
            );
        }
    }

    #[test]
    fn opposite_faces_do_not_make_a_frame() {
        assert_eq!(
            RoleFrame::new(White, Yellow),
            Err(GeometryError::NotAdjacent(White, Yellow))
        );
        assert!(RoleFrame::new(Green, Green).is_err());
    }
}
