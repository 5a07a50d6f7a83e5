mod geo;
mod module;

pub use geo::*;
pub use module::*;
