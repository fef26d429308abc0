pub mod http;
pub mod source;
pub mod stager;

pub use source::Source;
pub use stager::{CachingStager, FileStager};
