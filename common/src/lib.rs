pub mod collision;
pub mod constants;
pub mod error;
pub mod grid;
#[cfg(feature = "json")]
pub mod io;
pub mod levels;
pub mod maze;
pub mod players;
pub mod pois;
pub mod protocol;
pub mod spawning;

pub use error::{LevelError, PlacementError};
pub use grid::{Cell, OccupancyGrid};
pub use levels::{LevelCatalog, LevelDescription, generate_level};
pub use maze::{MazeGrid, generate_maze};
pub use spawning::{find_edge_spot, find_free_spot};
