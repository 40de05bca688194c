pub mod check;
pub mod evaluate;
pub mod init;
pub mod list;
pub mod next;
pub mod validate;
