//! CLI command implementations.

pub mod common;
pub mod demo;
pub mod draw;
pub mod selftest;
pub mod tool;
pub mod version;
