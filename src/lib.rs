//! Command-line front end for `ising-sim`: argument parsing, rendering and
//! export of spin lattices.

pub mod cli;
pub mod export;
pub mod render;
