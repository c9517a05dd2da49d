pub mod check;
pub mod init;
pub mod perform;
pub mod show;
pub mod sing;
pub mod versions;
