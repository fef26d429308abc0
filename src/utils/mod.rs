pub mod errors;
pub mod output;
pub mod paths;

pub use errors::*;
pub use output::*;
pub use paths::*;
