mod api;
mod resources;
mod servers;
mod user;

pub use api::*;
pub use resources::*;
pub use servers::*;
pub use user::*;
