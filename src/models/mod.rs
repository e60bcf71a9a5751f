pub mod assessment;
pub mod control;
pub mod verdict;

pub use assessment::*;
pub use control::*;
pub use verdict::*;
