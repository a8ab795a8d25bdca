//! End-to-end integration tests for KeyMask
//!
//! The tests in `tests/` wire the masking engine, the resolver chain and the
//! schema loader together to verify the full flow from config to output.
