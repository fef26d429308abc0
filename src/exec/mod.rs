pub mod runner;

pub use runner::{CommandRunner, ShellRunner};
