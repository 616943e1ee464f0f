#![crate_type = "lib"]
#![crate_name = "pagepool"]

pub mod common;
pub mod config;
pub mod storage;
