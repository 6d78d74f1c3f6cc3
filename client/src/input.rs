use anyhow::{Context, Result, bail};

use common::players::InputSnapshot;

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    // Hold the given intents for a number of ticks
    Hold { input: InputSnapshot, ticks: u32 },
    Interact,
    Look { dx: f32 },
    Lock(bool),
    Level(u32),
    Status,
    Map,
    Help,
    Quit,
}

// ============================================================================
// Parsing
// ============================================================================

// Apply one movement key to the snapshot. Returns false for unknown keys.
fn press(input: &mut InputSnapshot, key: &str) -> bool {
    match key {
        "w" | "up" | "forward" => input.forward = true,
        "s" | "down" | "back" => input.back = true,
        "a" | "left" => input.left = true,
        "d" | "right" => input.right = true,
        "jump" | "space" => input.jump = true,
        "e" | "interact" => input.interact = true,
        _ => return false,
    }
    true
}

fn parse_ticks(arg: Option<&str>, default: u32) -> Result<u32> {
    arg.map_or(Ok(default), |s| s.parse().with_context(|| format!("invalid tick count '{s}'")))
}

/// Parse one line of player input. Movement keys can be combined with `+`
/// (`w+d 30`) and take an optional tick count.
pub fn parse_command(line: &str, ticks_per_step: u32) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        bail!("empty command");
    };
    let arg = parts.next();
    let word = word.to_ascii_lowercase();

    let command = match word.as_str() {
        "e" | "interact" => Command::Interact,
        "wait" => Command::Hold {
            input: InputSnapshot::default(),
            ticks: parse_ticks(arg, ticks_per_step)?,
        },
        "look" => {
            let dx = arg.context("usage: look <dx>")?;
            Command::Look {
                dx: dx.parse().with_context(|| format!("invalid mouse movement '{dx}'"))?,
            }
        }
        "lock" => Command::Lock(true),
        "unlock" => Command::Lock(false),
        "level" => {
            let level = arg.context("usage: level <n>")?;
            Command::Level(level.parse().with_context(|| format!("invalid level '{level}'"))?)
        }
        "status" => Command::Status,
        "map" => Command::Map,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        keys => {
            let mut input = InputSnapshot::default();
            for key in keys.split('+') {
                if !press(&mut input, key) {
                    bail!("unknown command '{key}', type help for a list");
                }
            }
            Command::Hold {
                input,
                ticks: parse_ticks(arg, ticks_per_step)?,
            }
        }
    };
    Ok(command)
}

pub const HELP: &str = "\
Available commands:
  w|a|s|d [ticks]     - Move (also up/down/left/right, forward/back)
  w+d [ticks]         - Combine keys with +
  jump [ticks]        - Jump (combine with movement, e.g. w+jump)
  e | interact        - Activate nearby points of interest (w+e holds it)
  wait [ticks]        - Let time pass
  look <dx>           - Move the mouse horizontally
  lock | unlock       - Lock or release the pointer
  level <n>           - Load a level
  status              - Show player and level state
  map                 - Draw the current level
  help | ?            - Show this help message
  quit | exit         - Leave the game";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_combine() {
        let cmd = parse_command("w+d 30", 20).unwrap();
        let Command::Hold { input, ticks } = cmd else {
            panic!("expected a hold command, got {cmd:?}");
        };
        assert!(input.forward && input.right && !input.left);
        assert_eq!(ticks, 30);
    }

    #[test]
    fn interact_can_be_held_with_movement() {
        let cmd = parse_command("w+e 3", 20).unwrap();
        assert_eq!(
            cmd,
            Command::Hold {
                input: InputSnapshot {
                    forward: true,
                    interact: true,
                    ..Default::default()
                },
                ticks: 3,
            }
        );
    }

    #[test]
    fn tick_count_defaults() {
        assert_eq!(
            parse_command("jump", 7).unwrap(),
            Command::Hold {
                input: InputSnapshot {
                    jump: true,
                    ..Default::default()
                },
                ticks: 7,
            }
        );
        assert_eq!(
            parse_command("wait", 5).unwrap(),
            Command::Hold {
                input: InputSnapshot::default(),
                ticks: 5,
            }
        );
    }

    #[test]
    fn other_commands() {
        assert_eq!(parse_command("E", 1).unwrap(), Command::Interact);
        assert_eq!(parse_command("level 4", 1).unwrap(), Command::Level(4));
        assert_eq!(parse_command("look -12.5", 1).unwrap(), Command::Look { dx: -12.5 });
        assert_eq!(parse_command("unlock", 1).unwrap(), Command::Lock(false));
        assert_eq!(parse_command("  quit  ", 1).unwrap(), Command::Quit);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse_command("", 1).is_err());
        assert!(parse_command("fly", 1).is_err());
        assert!(parse_command("w+x", 1).is_err());
        assert!(parse_command("level", 1).is_err());
        assert!(parse_command("level two", 1).is_err());
        assert!(parse_command("w many", 1).is_err());
    }
}
