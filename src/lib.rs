//! Body Intelligence Engine Library
//!
//! Analysis of food intake, weight and body-composition history.

pub mod config;
pub mod error;
pub mod intelligence;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
