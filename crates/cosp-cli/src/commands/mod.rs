pub mod delete;
pub mod init;
pub mod list;
pub mod paste;
pub mod store;
pub mod upload;
