//! Integration tests for graphdecl_language.
//!
//! These drive the scanner over real files on disk, the way the CLI does.
