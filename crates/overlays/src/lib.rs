pub mod hover;
pub mod menu;
pub mod style_map;
pub mod stylesheet;
pub mod taxonomy;
pub mod toggles;

pub use hover::*;
pub use menu::*;
pub use style_map::*;
pub use stylesheet::*;
pub use taxonomy::*;
pub use toggles::*;
