pub mod chart;
pub mod indicators;
pub mod market;
pub mod pattern;
pub mod report;
pub mod risk;
pub mod sentiment;
pub mod signal;

pub use chart::*;
pub use indicators::*;
pub use market::*;
pub use pattern::*;
pub use report::*;
pub use risk::*;
pub use sentiment::*;
pub use signal::*;
