// HTTP routes
pub mod health;
pub mod home;
pub mod ingest;
pub mod query;
pub mod stats;

pub use health::*;
pub use home::*;
pub use ingest::*;
pub use query::*;
pub use stats::*;
