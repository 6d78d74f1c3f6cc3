use crate::{
    collision::overlap_player_vs_poi,
    protocol::{Poi, Position},
};

// True iff every POI has been completed. A level without POIs counts as
// complete.
#[must_use]
pub fn is_level_complete(pois: &[Poi]) -> bool {
    pois.iter().all(|poi| poi.completed)
}

// True if any POI is within interaction range of the player
#[must_use]
pub fn any_in_range(player_pos: &Position, pois: &[Poi]) -> bool {
    pois.iter().any(|poi| overlap_player_vs_poi(player_pos, &poi.position))
}

// Complete every in-range POI that is not complete yet. Returns the indices
// that changed.
pub fn complete_in_range(player_pos: &Position, pois: &mut [Poi]) -> Vec<usize> {
    pois.iter_mut()
        .enumerate()
        .filter(|(_, poi)| !poi.completed && overlap_player_vs_poi(player_pos, &poi.position))
        .map(|(index, poi)| {
            poi.completed = true;
            index
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COMPLETED_COLOR, POI_PALETTE};

    fn poi_at(x: f32, z: f32) -> Poi {
        Poi {
            position: Position::new(x, 0.5, z),
            color: POI_PALETTE[0],
            completed: false,
        }
    }

    #[test]
    fn level_completes_only_when_all_pois_are_done() {
        let mut pois = vec![poi_at(0.0, 0.0), poi_at(4.0, 0.0)];
        assert!(!is_level_complete(&pois));
        pois[0].completed = true;
        assert!(!is_level_complete(&pois));
        pois[1].completed = true;
        assert!(is_level_complete(&pois));
        assert!(is_level_complete(&[]));
    }

    #[test]
    fn interaction_completes_only_nearby_pois() {
        let mut pois = vec![poi_at(0.0, 0.0), poi_at(4.0, 0.0), poi_at(0.5, 0.0)];
        let player = Position::new(0.2, 1.0, 0.0);
        assert!(any_in_range(&player, &pois));

        assert_eq!(complete_in_range(&player, &mut pois), vec![0, 2]);
        assert_eq!(pois[0].display_color(), COMPLETED_COLOR);
        assert!(!pois[1].completed);

        // Completed POIs are not reported twice
        assert!(complete_in_range(&player, &mut pois).is_empty());
    }

    #[test]
    fn far_player_sees_no_prompt() {
        let pois = vec![poi_at(0.0, 0.0)];
        assert!(!any_in_range(&Position::new(3.0, 1.0, 3.0), &pois));
    }
}
