mod cook;
mod coordinator;
mod customer;

pub use cook::*;
pub use coordinator::*;
pub use customer::*;
