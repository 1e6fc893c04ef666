//! Integration tests for graphdecl_graph.
//!
//! Ordering is checked both on hand-built resource sets and on generated
//! graphs whose acyclicity is known by construction.

mod ordering;
