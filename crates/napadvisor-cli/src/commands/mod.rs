pub mod config;
pub mod guide;
pub mod recommend;
