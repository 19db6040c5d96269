//! Interactive command handler.
//!
//! Reads one command per line and redraws the grid after each one:
//!
//! ```text
//! place R C   start, then finish, then walls (aliases: p, wall)
//! clear R C   reset a cell to unvisited (alias: c)
//! step        advance the search by one expansion (alias: s, or an empty line)
//! reset       discard search progress, keep walls and endpoints
//! show        redraw the grid
//! help        list commands
//! quit        leave (alias: q, exit)
//! ```

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tracing::debug;

use gridpath_lib::{EditOutcome, Error as SearchError, Position, Session, StepOutcome};

use crate::output::{
    format_step, outcome_message, render_grid, status_line, write_json, OutputFormat,
};
use crate::terminal::ColorPalette;

const HELP: &str = "\
commands:
  place R C   start, then finish, then walls
  clear R C   reset a cell to unvisited
  step        advance one expansion (or press enter)
  reset       discard search progress
  show        redraw the grid
  quit        leave";

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Place(Position),
    Clear(Position),
    Step,
    Reset,
    Show,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(Action::Step);
        };

        let action = match verb.to_ascii_lowercase().as_str() {
            "place" | "p" | "wall" => Action::Place(parse_position(&mut tokens)?),
            "clear" | "c" => Action::Clear(parse_position(&mut tokens)?),
            "step" | "s" => Action::Step,
            "reset" => Action::Reset,
            "show" => Action::Show,
            "help" | "?" => Action::Help,
            "quit" | "q" | "exit" => Action::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };

        if let Some(extra) = tokens.next() {
            bail!("unexpected argument '{extra}'");
        }
        Ok(action)
    }
}

fn parse_position<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Position> {
    let mut coordinate = |axis: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| anyhow!("missing {axis}; expected 'ROW COL'"))?;
        token
            .parse()
            .map_err(|_| anyhow!("invalid {axis} '{token}'"))
    };
    let row = coordinate("row")?;
    let col = coordinate("col")?;
    Ok(Position::new(row, col))
}

/// Millisecond clock for cell timestamps. Starts at 1 so a zero timestamp
/// always means "never edited".
#[derive(Debug)]
pub struct Clock(Instant);

impl Clock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn now_ms(&self) -> u64 {
        self.0.elapsed().as_millis() as u64 + 1
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
enum Event<'a> {
    Edit {
        position: Position,
        outcome: EditOutcome,
    },
    Step {
        outcome: &'a StepOutcome,
    },
    Error {
        message: String,
    },
    Snapshot {
        session: gridpath_lib::SessionSnapshot,
    },
}

/// Drive `session` from `input` until end of input or `quit`.
pub fn handle_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    let clock = Clock::start();

    if format == OutputFormat::Text {
        writeln!(out, "{HELP}")?;
        redraw(session, out, palette)?;
    }

    for line in input.lines() {
        let line = line?;
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                report_error(out, format, &err.to_string())?;
                continue;
            }
        };
        debug!(?action, "interactive command");

        match action {
            Action::Quit => break,
            Action::Help => {
                if format == OutputFormat::Text {
                    writeln!(out, "{HELP}")?;
                }
            }
            Action::Show => show(session, out, format, palette)?,
            Action::Place(position) | Action::Clear(position) => {
                let now = clock.now_ms();
                let result = if matches!(action, Action::Place(_)) {
                    session.place(position, now)
                } else {
                    session.clear(position, now)
                };
                match result {
                    Ok(outcome) => {
                        if format == OutputFormat::Json {
                            write_json(out, &Event::Edit { position, outcome })?;
                        } else {
                            if outcome == EditOutcome::Debounced {
                                writeln!(out, "cell {position} changed too recently; ignored")?;
                            }
                            redraw(session, out, palette)?;
                        }
                    }
                    Err(err) => report_error(out, format, &err.to_string())?,
                }
            }
            Action::Step => match session.advance(clock.now_ms()) {
                Ok(outcome) => {
                    if format == OutputFormat::Json {
                        write_json(out, &Event::Step { outcome: &outcome })?;
                    } else {
                        writeln!(out, "{}", format_step(session.steps_taken(), &outcome))?;
                        redraw(session, out, palette)?;
                    }
                }
                Err(SearchError::ExhaustedFrontier) => {
                    if format == OutputFormat::Json {
                        report_error(out, format, &SearchError::ExhaustedFrontier.to_string())?;
                    } else {
                        redraw(session, out, palette)?;
                    }
                }
                Err(err) => report_error(out, format, &err.to_string())?,
            },
            Action::Reset => match session.reset(clock.now_ms()) {
                Ok(()) => show(session, out, format, palette)?,
                Err(err) => report_error(out, format, &err.to_string())?,
            },
        }
    }

    Ok(())
}

fn show<W: Write>(
    session: &Session,
    out: &mut W,
    format: OutputFormat,
    palette: &ColorPalette,
) -> Result<()> {
    match format {
        OutputFormat::Text => redraw(session, out, palette),
        OutputFormat::Json => write_json(
            out,
            &Event::Snapshot {
                session: session.snapshot(),
            },
        ),
    }
}

fn redraw<W: Write>(session: &Session, out: &mut W, palette: &ColorPalette) -> Result<()> {
    write!(out, "{}", render_grid(session, palette))?;
    writeln!(out, "{}", status_line(session))?;
    if let Some(message) = outcome_message(session, palette) {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

fn report_error<W: Write>(out: &mut W, format: OutputFormat, message: &str) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "error: {message}")?,
        OutputFormat::Json => write_json(
            out,
            &Event::Error {
                message: message.to_string(),
            },
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_lib::{CellState, GridConfig, SessionStatus};

    fn run(session: &mut Session, script: &str, format: OutputFormat) -> String {
        let mut out = Vec::new();
        handle_interactive(
            session,
            script.as_bytes(),
            &mut out,
            format,
            &ColorPalette::plain(),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fresh(side: usize) -> Session {
        Session::new(GridConfig::default().with_side_length(side).with_cooldown_ms(0)).unwrap()
    }

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!("".parse::<Action>().unwrap(), Action::Step);
        assert_eq!("  s ".parse::<Action>().unwrap(), Action::Step);
        assert_eq!(
            "wall 2 3".parse::<Action>().unwrap(),
            Action::Place(Position::new(2, 3))
        );
        assert_eq!(
            "C 0 1".parse::<Action>().unwrap(),
            Action::Clear(Position::new(0, 1))
        );
        assert_eq!("exit".parse::<Action>().unwrap(), Action::Quit);
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!("place 1".parse::<Action>().is_err());
        assert!("place a 1".parse::<Action>().is_err());
        assert!("step now".parse::<Action>().is_err());
        assert!("jump".parse::<Action>().is_err());
        assert!("start 1 1".parse::<Action>().is_err());
        assert!("finish 1 1".parse::<Action>().is_err());
    }

    #[test]
    fn scripted_session_finds_the_finish() {
        let mut session = fresh(3);
        let text = run(
            &mut session,
            "place 0 0\nplace 2 2\nstep\n\nstep\nstep\n",
            OutputFormat::Text,
        );

        assert!(text.contains("Finish found!"), "{text}");
        assert_eq!(session.status(), SessionStatus::Found);
        assert_eq!(
            session.grid().cell(Position::new(2, 2)).state(),
            CellState::Finish
        );
    }

    #[test]
    fn stepping_too_early_prints_an_error_and_continues() {
        let mut session = fresh(3);
        let text = run(&mut session, "step\nplace 1 1\nquit\nplace 2 2\n", OutputFormat::Text);

        assert!(text.contains("error: invalid state"), "{text}");
        assert_eq!(session.start(), Some(Position::new(1, 1)));
        assert_eq!(session.finish(), None, "input after quit is ignored");
    }

    #[test]
    fn json_mode_emits_one_event_per_line() {
        let mut session = fresh(2);
        let text = run(&mut session, "place 0 0\nplace 1 1\nstep\n", OutputFormat::Json);

        let events: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["event"], "edit");
        assert_eq!(events[0]["outcome"]["state"], "start");
        assert_eq!(events[2]["event"], "step");
        assert_eq!(events[2]["outcome"]["expanded"]["row"], 0);
    }
}
