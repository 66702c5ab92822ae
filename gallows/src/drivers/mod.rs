//! Hardware device drivers
//!
//! This module contains drivers for the devices the kernel talks to
//! outside the attunement layer.

pub mod serial;
