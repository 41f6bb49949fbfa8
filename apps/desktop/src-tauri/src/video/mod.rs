//! Camera capture backed by nokhwa.
//!
//! Implements the core crate's camera backend seam: OS permission checks,
//! device enumeration, capability probing, and a paced RGBA frame stream
//! for the preview renderer.

pub mod capture;

pub use capture::NokhwaBackend;
