pub mod obstacles;
pub mod pois;

pub use obstacles::{blocking_obstacle, can_move, resolve_move};
pub use pois::overlap_player_vs_poi;
