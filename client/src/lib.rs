pub mod camera;
pub mod config;
pub mod constants;
pub mod events;
pub mod game;
pub mod input;

pub use config::{ControlScheme, SessionConfig, init_tracing};
pub use events::GameEvent;
pub use game::GameSession;

use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::warn;

use common::{constants::SPACING, grid::Cell, levels::level_exists, protocol::Position};
use input::{Command, HELP, parse_command};

// ============================================================================
// Text Rendering
// ============================================================================

// Lattice cell the player stands on
fn player_cell(position: &Position) -> (i32, i32) {
    let to_index = |v: f32| (v / SPACING).round() as i32;
    (to_index(position.x), to_index(position.z))
}

/// Draw the current level as text, one row per z. `R` rock, `f` flora,
/// `P` open point of interest, `p` completed one, `@` the player.
pub fn render_map<R: Rng>(session: &mut GameSession<R>) -> Option<String> {
    let player = session.player_position().map(|p| player_cell(&p));
    let completed: Vec<bool> = session.pois().iter().map(|p| p.completed).collect();
    let description = session.description()?;
    let size = description.size as i32;

    let mut rows = vec![vec!['.'; description.size]; description.size];
    let mut mark = |cell: Cell, c: char| {
        if let (Ok(x), Ok(z)) = (usize::try_from(cell.x), usize::try_from(cell.z))
            && let Some(slot) = rows.get_mut(z).and_then(|row| row.get_mut(x))
        {
            *slot = c;
        }
    };
    for rock in &description.rocks {
        mark(rock.cell, 'R');
    }
    for flora in &description.flora {
        mark(flora.cell, 'f');
    }
    for (poi, &done) in description.pois.iter().zip(&completed) {
        mark(poi.cell, if done { 'p' } else { 'P' });
    }
    if let Some((x, z)) = player
        && (0..size).contains(&x)
        && (0..size).contains(&z)
    {
        mark(Cell::ground(x, z), '@');
    }

    let mut out = String::new();
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    Some(out)
}

fn status_line<R: Rng>(session: &GameSession<R>) -> String {
    match (session.current_level(), session.player_position()) {
        (Some(level), Some(p)) => format!(
            "level {level} | position ({:.2}, {:.2}, {:.2}) {} | {}/{} points of interest | camera {:?}{} | tick {}",
            p.x,
            p.y,
            p.z,
            if session.is_player_grounded() { "grounded" } else { "airborne" },
            session.completed_pois(),
            session.pois().len(),
            session.camera().mode(),
            if session.camera().is_locked() { " (locked)" } else { "" },
            session.ticks()
        ),
        _ => "no level loaded".to_string(),
    }
}

// ============================================================================
// Command Loop
// ============================================================================

// Print events; a passed level loads the next one. Returns false once the
// last level has been passed.
fn handle_events<R: Rng, W: Write>(session: &mut GameSession<R>, events: Vec<GameEvent>, out: &mut W) -> Result<bool> {
    for event in events {
        writeln!(out, "{event}")?;
        if let GameEvent::LevelPassed { level } = event {
            if !level_exists(level + 1) {
                writeln!(out, "All levels complete!")?;
                return Ok(false);
            }
            match session.load_level(level + 1) {
                Ok(loaded) => {
                    for event in loaded {
                        writeln!(out, "{event}")?;
                    }
                }
                Err(e) => {
                    writeln!(out, "{e}")?;
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

/// Drive a session from line-based commands until `quit`, end of input, or
/// the last level is passed.
pub fn run_script<R: Rng, B: BufRead, W: Write>(
    session: &mut GameSession<R>,
    ticks_per_step: u32,
    reader: B,
    out: &mut W,
) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line, ticks_per_step) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        let keep_going = match command {
            Command::Hold { input, ticks } => {
                let mut keep_going = true;
                for _ in 0..ticks {
                    let events = session.tick(&input);
                    keep_going = handle_events(session, events, out)?;
                    if !keep_going {
                        break;
                    }
                }
                keep_going
            }
            Command::Interact => {
                let events = session.interact();
                if events.is_empty() {
                    writeln!(out, "nothing to interact with")?;
                }
                handle_events(session, events, out)?
            }
            Command::Look { dx } => {
                session.camera_mut().add_mouse_motion(dx);
                true
            }
            Command::Lock(locked) => {
                session.camera_mut().set_locked(locked);
                true
            }
            Command::Level(level) => {
                match session.load_level(level) {
                    Ok(events) => handle_events(session, events, out)?,
                    Err(e) => {
                        warn!("{e}");
                        writeln!(out, "{e}")?;
                        true
                    }
                }
            }
            Command::Status => {
                writeln!(out, "{}", status_line(session))?;
                true
            }
            Command::Map => {
                match render_map(session) {
                    Some(map) => write!(out, "{map}")?,
                    None => writeln!(out, "no level loaded")?,
                }
                true
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                true
            }
            Command::Quit => false,
        };

        if !keep_going {
            break;
        }
    }
    writeln!(out, "Goodbye!")?;
    Ok(())
}
