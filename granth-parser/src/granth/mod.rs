//! Main module for granth library functionality

pub mod assembling;
pub mod config;
pub mod document;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod token;
pub mod transforms;
