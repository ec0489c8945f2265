pub mod grid;
pub mod image_ref;
pub mod overlay;
pub mod selection;
pub mod share;
pub mod utils;
