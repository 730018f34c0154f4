use crate::{AppError, AppResult};

use std::panic::Location;

use app_icon_core::IconName;
use error_location::ErrorLocation;

/// Commands the harness understands, one per bridge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Report whether alternate icons are supported.
    Supports,
    /// Report the icon currently shown.
    Current,
    /// List every icon that can be selected.
    List,
    /// Switch to an icon.
    Set {
        /// Icon to switch to, `DEFAULT` for the primary icon.
        name: IconName,
    },
    /// Stop processing commands.
    Quit,
}

impl AppCommand {
    /// Parse a whitespace-separated command sequence such as
    /// `list set red current`.
    #[track_caller]
    pub fn parse_all<I, S>(tokens: I) -> AppResult<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = tokens.into_iter();
        let mut commands = Vec::new();

        while let Some(token) = tokens.next() {
            let command = match token.as_ref() {
                "supports" => AppCommand::Supports,
                "current" => AppCommand::Current,
                "list" => AppCommand::List,
                "quit" | "exit" => AppCommand::Quit,
                "set" => {
                    let name = tokens.next().ok_or_else(|| AppError::CommandError {
                        reason: "`set` needs an icon name".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                    AppCommand::Set {
                        name: IconName::new(name.as_ref()),
                    }
                }
                other => {
                    return Err(AppError::CommandError {
                        reason: format!(
                            "Unknown command {:?} (expected supports, current, list, set <name>, quit)",
                            other
                        ),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            };
            commands.push(command);
        }

        Ok(commands)
    }

    /// Parse one line of interactive input.
    #[track_caller]
    pub fn parse_line(line: &str) -> AppResult<Vec<Self>> {
        Self::parse_all(line.split_whitespace())
    }
}
