pub mod command;
pub mod manager;
pub mod parser;
pub mod platform;

pub use command::{CertutilCommand, DEFAULT_EXECUTABLE};
pub use manager::StoreManager;
pub use parser::{parse_store_serials, parse_verify_serial};
pub use platform::Platform;
