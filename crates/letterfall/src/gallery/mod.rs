// gallery/mod.rs
//
// Series data, lightbox navigation and zoom gestures for the artwork pages.

pub mod lightbox;
pub mod series;
pub mod zoom;

pub use lightbox::{Direction, Lightbox, LightboxConfig, LightboxView};
pub use series::{Artwork, Gallery, Series, Year};
pub use zoom::{ZoomConfig, ZoomPan};
