pub mod grade;
pub mod init;
pub mod parts;
pub mod report;
pub mod show;
pub mod validate;
