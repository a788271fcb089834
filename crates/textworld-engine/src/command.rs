//! Player command parsing.
//!
//! One line of input becomes one [`Command`]. Movement and speech turn into
//! intents queued on the player; the rest are handled by the host.

use textworld_types::Intent;

use crate::error::CommandError;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move through the named exit.
    Move(String),
    /// Say something to everyone present.
    Say(String),
    /// Describe the current location.
    Look,
    /// Show need gauges.
    Status,
    /// Show the occupancy map.
    Map,
    /// List the commands.
    Help,
    /// Leave the game.
    Quit,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, r)| (v, r.trim()));
        let verb = verb.to_lowercase();

        if let Some(direction) = direction_shorthand(&verb) {
            return Ok(Self::Move(direction.to_owned()));
        }

        match verb.as_str() {
            "" => Err(CommandError::Empty),
            "move" | "go" => {
                let direction = direction_shorthand(&rest.to_lowercase()).unwrap_or(rest);
                non_empty(&verb, direction).map(Self::Move)
            }
            "say" => non_empty(&verb, rest).map(Self::Say),
            "look" | "l" => Ok(Self::Look),
            "status" => Ok(Self::Status),
            "map" => Ok(Self::Map),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(verb)),
        }
    }

    /// The intent this command queues on the player, if any.
    pub fn into_intent(self) -> Option<Intent> {
        match self {
            Self::Move(direction) => Some(Intent::move_through(direction)),
            Self::Say(content) => Some(Intent::say(content)),
            Self::Look | Self::Status | Self::Map | Self::Help | Self::Quit => None,
        }
    }
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  north | south | east | west   (or n, s, e, w)  move through an exit
  move <exit>                   move through a named exit
  say <text>                    speak to everyone here
  look                          describe your surroundings
  status                        show your needs
  map                           show who is where
  quit                          leave the game";

/// Expand a compass word or its first letter to the exit name.
fn direction_shorthand(word: &str) -> Option<&'static str> {
    match word {
        "n" | "north" => Some("North"),
        "s" | "south" => Some("South"),
        "e" | "east" => Some("East"),
        "w" | "west" => Some("West"),
        _ => None,
    }
}

fn non_empty(verb: &str, argument: &str) -> Result<String, CommandError> {
    if argument.is_empty() {
        Err(CommandError::MissingArgument {
            verb: verb.to_owned(),
        })
    } else {
        Ok(argument.to_owned())
    }
}
