pub mod candidate;
pub mod color;
pub mod variant;

pub use candidate::*;
pub use color::*;
pub use variant::*;
