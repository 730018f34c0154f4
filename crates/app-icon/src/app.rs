use crate::{AppCommand, AppError, AppResult};

use std::{io::Write, ops::ControlFlow, panic::Location};

use app_icon_core::{IconBridge, IconName, SimulatedPlatform};
use error_location::ErrorLocation;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, instrument};

/// Harness state: the bridge under test and where results are printed.
///
/// One result line per command goes to `out`. Failures are printed as
/// `error: ...` lines and logged, and processing continues.
pub struct App<W> {
    pub(crate) bridge: IconBridge<SimulatedPlatform>,
    pub(crate) blocking: bool,
    pub(crate) out: W,
}

impl<W: Write> App<W> {
    /// Run a fixed command sequence.
    #[instrument(skip(self, commands), fields(command_count = commands.len()))]
    pub(crate) async fn run_commands(&mut self, commands: Vec<AppCommand>) -> AppResult<()> {
        for command in commands {
            if self.dispatch(command).await?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Read commands line by line until end of input or `quit`.
    #[instrument(skip(self, reader))]
    pub(crate) async fn run_interactive<R>(&mut self, reader: R) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!("Reading commands from input");

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let commands = match AppCommand::parse_line(&line) {
                Ok(commands) => commands,
                Err(e) => {
                    error!(error = ?e, "Invalid command");
                    self.report_error(&e)?;
                    continue;
                }
            };

            for command in commands {
                if self.dispatch(command).await?.is_break() {
                    info!("Quit requested");
                    return Ok(());
                }
            }
        }

        debug!("Input closed");

        Ok(())
    }

    async fn dispatch(&mut self, command: AppCommand) -> AppResult<ControlFlow<()>> {
        match command {
            AppCommand::Supports => {
                writeln!(self.out, "{}", self.bridge.supports_alternate_icons())?;
            }
            AppCommand::Current => {
                writeln!(self.out, "{}", self.bridge.current_icon())?;
            }
            AppCommand::List => {
                for icon in self.bridge.available_icons() {
                    writeln!(self.out, "{}", icon)?;
                }
            }
            AppCommand::Set { name } => match self.set_icon(name).await {
                Ok(active) => writeln!(self.out, "{}", active)?,
                Err(e) => {
                    error!(error = ?e, "Failed to change app icon");
                    self.report_error(&e)?;
                }
            },
            AppCommand::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }

    async fn set_icon(&self, name: IconName) -> AppResult<IconName> {
        if !self.blocking {
            return Ok(self.bridge.set_icon(name).await?);
        }

        // The blocking adapter parks its thread until the host answers, so
        // it must run off the async workers.
        let bridge = self.bridge.clone();
        let requested = name.clone();
        let active = tokio::task::spawn_blocking(move || bridge.set_icon_blocking(requested))
            .await
            .map_err(|e| AppError::CommandError {
                reason: format!("Icon change task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        active.ok_or_else(|| AppError::CommandError {
            reason: format!("Failed to change app icon to {}", name),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn report_error(&mut self, error: &AppError) -> AppResult<()> {
        let line = match error {
            AppError::Icon { source, .. } => format!("{}: {}", source.kind(), source.detail()),
            AppError::CommandError { reason, .. } | AppError::ConfigError { reason, .. } => {
                reason.clone()
            }
            AppError::IoError { source, .. } => source.to_string(),
        };
        writeln!(self.out, "error: {}", line)?;
        Ok(())
    }
}
