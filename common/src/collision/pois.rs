use crate::{constants::INTERACTION_RADIUS, protocol::Position};

// True if the player is close enough to interact with a POI (strictly inside
// the interaction radius)
#[must_use]
pub fn overlap_player_vs_poi(player_pos: &Position, poi_pos: &Position) -> bool {
    player_pos.distance(poi_pos) < INTERACTION_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_range_is_exclusive() {
        let poi = Position::new(4.0, 0.5, 4.0);
        assert!(overlap_player_vs_poi(&Position::new(4.0, 1.0, 4.5), &poi));
        assert!(!overlap_player_vs_poi(&Position::new(5.0, 0.5, 4.0), &poi));
        assert!(!overlap_player_vs_poi(&Position::new(8.0, 1.0, 8.0), &poi));
    }
}
