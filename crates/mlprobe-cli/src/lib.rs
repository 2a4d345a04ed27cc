//! mlprobe CLI library
//!
//! Exposes the command plumbing so it can be tested without spawning the
//! binary.

pub mod commands;
pub mod config;
pub mod exit;
pub mod logging;
pub mod output;
