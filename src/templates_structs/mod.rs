pub mod newsletter;
pub mod newsml;

pub use newsletter::*;
pub use newsml::*;
