//! Integration test crate for Annotile.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on every annotile crate to verify they work together.

#[cfg(test)]
mod cache;

#[cfg(test)]
mod dataset;

#[cfg(test)]
mod labels;
