pub mod error;
pub mod index;
pub mod level;
pub mod overlay;

pub use error::*;
pub use index::*;
pub use level::*;
pub use overlay::*;
