/// sysbeat - a heartbeat emitter and a resource sampler
///
/// This library holds the pieces shared by the `heartbeat` and
/// `resource-sampler` binaries: cancellation plumbing, memory and disk
/// sampling, record rendering, and the layered configuration.
pub mod cli;
pub mod config;
pub mod disk;
pub mod error;
pub mod heartbeat;
pub mod memory;
pub mod record;
pub mod sampler;
pub mod shutdown;
