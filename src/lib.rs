//! Run a user-configured script whenever the system switches between light
//! and dark appearance.

pub mod cli;
pub mod error;
pub mod runner;
pub mod storage;
pub mod theme;
pub mod watcher;

#[cfg(test)]
mod test_support;
