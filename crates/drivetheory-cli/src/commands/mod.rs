pub mod check;
pub mod history;
pub mod init;
pub mod mistakes;
pub mod preview;
pub mod resources;
pub mod take;
pub mod topics;
pub mod train;
