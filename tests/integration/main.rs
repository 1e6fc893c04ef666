//! Integration tests spanning every layer.
//!
//! Each test drives a full workflow the way the CLI chains the crates:
//! scan, order, synthesize, import, and diff.

mod pipeline;
mod round_trip;
