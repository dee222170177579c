pub mod layer;
pub mod pick;
pub mod style;
