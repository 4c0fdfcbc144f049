pub mod check;
pub mod ranges;
pub mod resolve;
