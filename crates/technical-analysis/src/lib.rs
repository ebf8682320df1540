pub mod calculator;
pub mod indicators;
pub mod levels;


pub use calculator::*;
pub use indicators::*;
pub use levels::*;
