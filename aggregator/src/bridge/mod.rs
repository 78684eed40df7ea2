pub mod model;
pub mod server;

pub use server::routes;
