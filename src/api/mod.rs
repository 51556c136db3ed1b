pub mod beer_handlers;
pub mod brewery_handlers;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use routes::*;
