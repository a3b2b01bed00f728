pub mod cli;
pub mod crypto;
pub mod errors;
pub mod storage;
pub mod vault;
