//! Core library: normalization, fuzzy matching, and the answer/teach engine.

pub mod capitalizer;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod normalizer;
pub mod similarity;
pub mod vocabulary;
