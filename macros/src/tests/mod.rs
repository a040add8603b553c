//! Expansion tests for the procedural macros
