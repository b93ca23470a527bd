pub mod clock;
pub mod mjd;

pub use clock::*;
pub use mjd::*;
