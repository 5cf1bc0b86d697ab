// Application layer - the rental desk state machine and its reports.

pub mod consistency;
pub mod error;
pub mod service;
pub mod shared;

pub use consistency::*;
pub use error::*;
pub use service::*;
pub use shared::*;
