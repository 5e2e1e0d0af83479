//! Rule engine for a roll-and-cross score sheet: which cells may be crossed, and what the sheet is worth.
#![no_std]

extern crate alloc;

pub use action::*;
pub use color::*;
pub use error::*;
pub use highlight::*;
pub use layout::*;
pub use reachability::*;
pub use scoring::*;
pub use state::*;
pub use types::*;

mod action;
mod color;
mod error;
mod highlight;
mod layout;
mod reachability;
mod scoring;
mod state;
mod types;
