//! Integration tests for graphdecl_foundation.
//!
//! These exercise the resource model, the kind alias table, and the error
//! type through the public API only.

mod errors;
mod kinds;
