pub mod beer;
pub mod brewery;
pub mod common;

pub use beer::*;
pub use brewery::*;
pub use common::*;
