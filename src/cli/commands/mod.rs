pub mod clock;
pub mod config;
pub mod init;
pub mod list;
pub mod log;
pub mod queue;
pub mod sync;
