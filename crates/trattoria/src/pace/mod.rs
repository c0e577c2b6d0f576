mod fixed;
mod interface;
mod random;

pub use fixed::*;
pub use interface::*;
pub use random::*;
