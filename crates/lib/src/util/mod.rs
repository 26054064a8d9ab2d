//! Test helpers for driving the engine without a real `nix` installation.

pub mod testutil;
