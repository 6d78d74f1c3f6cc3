use std::fmt;

// ============================================================================
// Placement Errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The grid has no cells to place into
    EmptyGrid,
    /// Rejection sampling hit its attempt cap without finding a free cell
    Exhausted { attempts: usize, size: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "cannot place into an empty grid"),
            Self::Exhausted { attempts, size } => {
                write!(f, "no free cell found in {size}x{size} grid after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

// ============================================================================
// Level Errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// No level config exists for this index
    NotFound(u32),
    /// The level could not be populated
    Placement { level: u32, source: PlacementError },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(level) => write!(f, "level \"{level}\" not found in level config"),
            Self::Placement { level, source } => write!(f, "failed to build level {level}: {source}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Placement { source, .. } => Some(source),
        }
    }
}
