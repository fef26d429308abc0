pub mod serial;

pub use serial::{SerialNumber, SerialNumberParseError};
