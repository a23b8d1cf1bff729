#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod filter;
pub mod infer;
pub mod retry;
pub mod traits;
pub mod types;
