use common::protocol::Color;

// ============================================================================
// Session Events
// ============================================================================

// Notifications a session emits for the presentation layer. These replace the
// overlay and callback hooks a renderer would install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelLoaded { level: u32, pois: usize },
    // The "press E to interact" prompt should appear
    PromptShown,
    PromptHidden,
    Interacted { poi: usize, color: Color },
    LevelPassed { level: u32 },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LevelLoaded { level, pois } => write!(f, "level {level} loaded with {pois} points of interest"),
            Self::PromptShown => write!(f, "Press E to interact"),
            Self::PromptHidden => write!(f, "(prompt hidden)"),
            Self::Interacted { poi, color } => write!(f, "completed point of interest #{poi} ({color})"),
            Self::LevelPassed { level } => write!(f, "level {level} passed!"),
        }
    }
}
