pub mod ids;
pub(crate) mod xml;

pub use ids::*;
