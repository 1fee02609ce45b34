//! Port contracts for command registration.

mod remote;

#[cfg(test)]
pub use remote::MockRemoteCommandRegistry;
pub use remote::{RemoteCommandRegistry, RemoteRegistryError, RemoteRegistryResult};
