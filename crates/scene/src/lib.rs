pub mod elevation;
pub mod level;
pub mod polygon;
pub mod view_box;
pub mod visibility;

pub use elevation::*;
pub use level::*;
pub use polygon::*;
pub use view_box::*;
pub use visibility::*;
