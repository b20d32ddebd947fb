pub mod pagination;
pub mod validation;
pub mod wheel;

pub use pagination::*;
pub use validation::*;
pub use wheel::{SpinOutcome, spin};
