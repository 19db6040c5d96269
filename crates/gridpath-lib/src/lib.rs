//! gridpath library entry points.
//!
//! This crate holds the grid model and the incremental best-first search
//! engine behind the step-by-step pathfinding demonstrator. Presentation
//! layers (the CLI) should drive searches through [`Session`] and read cell
//! state back from [`Grid`] instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cell;
pub mod config;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod layout;
pub mod search;
pub mod session;

pub use cell::{Cell, CellState, Position};
pub use config::GridConfig;
pub use error::{Error, Result};
pub use frontier::Frontier;
pub use grid::Grid;
pub use layout::Layout;
pub use search::{manhattan, step, ScoredNeighbour, SearchState, StepOutcome, STEP_COST};
pub use session::{EditOutcome, Session, SessionSnapshot, SessionStatus};
