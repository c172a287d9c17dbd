pub mod schema;

pub use schema::{Config, ErrorPolicy, SessionConfig};
