pub use self::builder::Builder;
pub use self::swap::{Refinement, SwapOptimizer};

mod builder;
mod swap;
