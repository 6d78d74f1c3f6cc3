use bevy_math::Vec3;

use crate::protocol::{Obstacle, Position};

// First obstacle whose collision radius strictly contains the candidate
#[must_use]
pub fn blocking_obstacle<'a>(candidate: &Position, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|obstacle| candidate.distance(&obstacle.position) < obstacle.radius())
}

/// Whether an entity at `position` may move by `offset`.
///
/// The move is refused if the candidate position ends up strictly inside any
/// obstacle's collision radius. Standing still is always allowed.
#[must_use]
pub fn can_move(position: &Position, offset: Vec3, obstacles: &[Obstacle]) -> bool {
    if offset == Vec3::ZERO {
        return true;
    }
    let candidate: Position = (Vec3::from(*position) + offset).into();
    blocking_obstacle(&candidate, obstacles).is_none()
}

// New position after trying to move; unchanged when blocked
#[must_use]
pub fn resolve_move(position: &Position, offset: Vec3, obstacles: &[Obstacle]) -> Position {
    if can_move(position, offset, obstacles) {
        (Vec3::from(*position) + offset).into()
    } else {
        *position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLORA_COLLISION_RADIUS, ROCK_COLLISION_RADIUS};

    fn rock_at_origin() -> Vec<Obstacle> {
        vec![Obstacle::new(Position::new(0.0, 0.0, 0.0), Some(ROCK_COLLISION_RADIUS))]
    }

    #[test]
    fn rock_blocks_inside_its_radius() {
        let start = Position::new(3.0, 0.0, 0.0);
        assert!(!can_move(&start, Vec3::new(-2.0, 0.0, 0.0), &rock_at_origin()));
        assert!(can_move(&start, Vec3::new(-1.5, 0.0, 0.0), &rock_at_origin()));
    }

    #[test]
    fn radius_boundary_is_not_a_collision() {
        let obstacles = vec![Obstacle::new(Position::new(0.0, 0.0, 0.0), Some(FLORA_COLLISION_RADIUS))];
        let start = Position::new(2.0, 0.0, 0.0);
        assert!(can_move(&start, Vec3::new(-1.0, 0.0, 0.0), &obstacles));
        assert!(!can_move(&start, Vec3::new(-1.01, 0.0, 0.0), &obstacles));
    }

    #[test]
    fn obstacles_without_radius_use_the_default() {
        let obstacles = vec![Obstacle::new(Position::new(0.0, 0.0, 0.0), None)];
        let start = Position::new(3.0, 0.0, 0.0);
        // 1.45 away: outside a rock's radius but inside the default 1.5
        assert!(!can_move(&start, Vec3::new(-1.55, 0.0, 0.0), &obstacles));
        assert!(can_move(&start, Vec3::new(-1.4, 0.0, 0.0), &obstacles));
    }

    #[test]
    fn zero_offset_is_always_allowed_and_changes_nothing() {
        // Even when already overlapping an obstacle
        let start = Position::new(0.5, 0.0, 0.0);
        assert!(can_move(&start, Vec3::ZERO, &rock_at_origin()));
        assert_eq!(resolve_move(&start, Vec3::ZERO, &rock_at_origin()), start);
    }

    #[test]
    fn blocked_moves_leave_position_unchanged() {
        let start = Position::new(3.0, 0.0, 0.0);
        assert_eq!(resolve_move(&start, Vec3::new(-2.0, 0.0, 0.0), &rock_at_origin()), start);
        assert_eq!(
            resolve_move(&start, Vec3::new(1.0, 0.0, 0.0), &rock_at_origin()),
            Position::new(4.0, 0.0, 0.0)
        );
    }

    #[test]
    fn blocking_obstacle_reports_the_first_hit() {
        let obstacles = vec![
            Obstacle::new(Position::new(10.0, 0.0, 0.0), Some(ROCK_COLLISION_RADIUS)),
            Obstacle::new(Position::new(0.0, 0.0, 0.0), Some(ROCK_COLLISION_RADIUS)),
        ];
        let hit = blocking_obstacle(&Position::new(0.5, 0.0, 0.0), &obstacles);
        assert_eq!(hit, Some(&obstacles[1]));
        assert!(blocking_obstacle(&Position::new(5.0, 0.0, 0.0), &obstacles).is_none());
    }
}
