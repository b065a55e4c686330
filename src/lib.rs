//! Plaquette Studio host library.
//!
//! The editor itself lives in the `canvas` crate and runs in the browser.
//! This crate is the host side: typed configuration, the circuit backend
//! client, and the workflows that carry workspace state to and from it.
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `STUDIO_*` environment configuration |
//! | [`backend`] | [`backend::Backend`] trait and its `reqwest` implementation |
//! | [`workflow`] | Circuit export and template import |

pub mod backend;
pub mod config;
pub mod workflow;
