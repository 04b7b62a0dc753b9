pub mod base;
pub mod dashscope;
