pub mod energy;
pub mod grid;

pub use grid::SpinGrid;
