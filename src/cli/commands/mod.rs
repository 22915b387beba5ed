pub mod extract;
pub mod init;
pub mod missing;
pub mod sync;
