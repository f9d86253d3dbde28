//! Simulated remote sync
//!
//! This module contains the stand-in sync client and its outcome type.

mod client;

pub use client::*;
