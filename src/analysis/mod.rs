pub mod elision;
pub mod grouping;
pub mod parents;
pub mod paths;

pub use elision::*;
pub use grouping::*;
pub use parents::*;
pub use paths::*;
