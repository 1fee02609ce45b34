//! In-process registries: executors per command, and registration keys per
//! remote command.

mod executors;
mod key_table;

pub use executors::{CommandEntry, ExecutorRegistry};
pub use key_table::KeyMappingTable;
