pub mod cert;
pub mod cli;
pub mod config;
pub mod exec;
pub mod staging;
pub mod store;
pub mod utils;

pub use cert::SerialNumber;
pub use cli::{args, commands};
pub use config::Config;
pub use exec::{CommandRunner, ShellRunner};
pub use staging::{CachingStager, FileStager};
pub use store::{Platform, StoreManager};
pub use utils::{errors, paths};
