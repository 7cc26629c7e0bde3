//! ClipCanvas
//!
//! Paste anything onto a persistent, file-backed canvas.

pub mod bootstrap;
