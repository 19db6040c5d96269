//! Show command handler: print the loaded grid and exit.

use std::io::Write;

use anyhow::Result;

use gridpath_lib::Session;

use crate::output::{render_grid, status_line, write_json, OutputFormat};
use crate::terminal::ColorPalette;

pub fn handle_show<W: Write>(
    session: &Session,
    format: OutputFormat,
    palette: &ColorPalette,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            write!(out, "{}", render_grid(session, palette))?;
            writeln!(out, "{}", status_line(session))?;
        }
        OutputFormat::Json => write_json(out, &session.snapshot())?,
    }
    Ok(())
}
