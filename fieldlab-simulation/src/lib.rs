pub mod formulas;
pub mod modes;

pub use formulas::{readout, Readout};
pub use modes::renderers;
