mod customer;
mod money;
mod pricing;
mod rental;
mod vehicle;

pub use customer::*;
pub use money::*;
pub use pricing::*;
pub use rental::*;
pub use vehicle::*;
