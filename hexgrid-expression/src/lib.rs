mod arg_utils;
pub mod builder;
pub mod cell;
pub mod error;
pub mod execution;
mod logical;
mod mathematical;
pub mod operator;
pub mod registry;

pub use sqlparser;
