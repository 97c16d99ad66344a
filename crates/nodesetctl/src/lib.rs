pub mod cmd_formats;
pub mod cmd_resolve;
pub mod cmd_show;
pub mod common;
