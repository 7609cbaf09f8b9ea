pub mod generation;
pub mod ids;
pub mod precision;

// Foundation crate: small, well-tested primitives only.
pub use generation::*;
pub use ids::*;
pub use precision::*;
