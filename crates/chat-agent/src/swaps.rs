pub mod base;
pub mod http;

#[cfg(test)]
pub mod mock;
