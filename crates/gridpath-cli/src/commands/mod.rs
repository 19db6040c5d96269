// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// builds the session and dispatches to these handlers.

pub mod interactive;
pub mod run;
pub mod show;
