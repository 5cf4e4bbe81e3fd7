//! Renderings of a presentation for agents to read.

pub mod markdown;
