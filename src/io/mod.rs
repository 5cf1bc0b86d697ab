pub mod export;
pub mod seed;

pub use export::*;
pub use seed::*;
