//! Presentation helpers for CI logs

pub mod ci;
