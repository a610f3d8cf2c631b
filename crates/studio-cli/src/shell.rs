use crate::app::{App, render};
use crate::commands::Commands;
use crate::error::Result as CliResult;

use studio_session::{ActivityEvent, SessionEvent};

use std::io::Write;

use clap::Parser;
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::RecvError;

#[derive(Parser)]
#[command(name = "studio", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Read commands line by line against one long-lived session.
///
/// Every line counts as activity. Session notices (expiry included) are
/// written to `out` as they happen. Ends on `exit`, `quit` or end of input.
pub async fn run<R, W>(app: &App, input: R, pretty: bool, out: &mut W) -> CliResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut events = app.session().subscribe();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if matches!(line, "exit" | "quit") {
                    break;
                }

                app.session().record_activity(ActivityEvent::KeyPress);

                match ShellLine::try_parse_from(line.split_whitespace()) {
                    Ok(ShellLine { command }) => match app.execute(&command).await {
                        Ok(value) => writeln!(out, "{}", render(&value, pretty)?)?,
                        Err(e) => {
                            writeln!(out, "Error: {e}")?;
                            if let Some(hint) = e.hint() {
                                writeln!(out, "{hint}")?;
                            }
                        }
                    },
                    Err(e) => writeln!(out, "{}", e.render())?,
                }
            }
            event = events.recv() => match event {
                Ok(SessionEvent::Expired) => writeln!(out, "{}", SessionEvent::Expired)?,
                Ok(event) => debug!("{event}"),
                Err(RecvError::Lagged(skipped)) => debug!("Missed {skipped} session events"),
                Err(RecvError::Closed) => break,
            },
        }
        out.flush()?;
    }

    Ok(())
}
