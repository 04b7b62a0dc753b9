pub mod base;
pub mod configs;
pub mod dashscope;
pub mod streaming;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod mock;
