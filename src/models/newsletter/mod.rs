pub mod assemble;
pub mod grouping;
pub mod proposal;
pub mod types;

pub use assemble::*;
pub use grouping::*;
pub use proposal::*;
pub use types::*;
