//! Plaquette editor engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! qubit lattice and every plaquette drawn over it, translates raw DOM input
//! events into workspace mutations, and renders the scene. The host layer
//! wires DOM events to the engine, shows toasts for [`engine::Action::Notify`],
//! and talks to the circuit backend with the payloads from [`export`].
//!
//! The geometric core (`geometry`, `hull`, `lattice`, `selection`,
//! `plaquette`, `extend`, `circuit`, `export`, `workspace`) is plain data and
//! holds no drawing state; only [`render`] and [`engine::Engine`] touch the
//! browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Points and the y-down turn, area and containment tests |
//! | [`hull`] | Graham-scan convex hull |
//! | [`lattice`] | Qubit grid with precomputed neighbor links |
//! | [`selection`] | Ordered qubit selection |
//! | [`plaquette`] | Plaquette hulls, colors, rotation |
//! | [`extend`] | Cloning a plaquette one lattice step in a drag direction |
//! | [`circuit`] | Stabilizer circuit text and ASCII art |
//! | [`export`] | Backend payloads, templates, library dump |
//! | [`workspace`] | The controller owning all editor state |
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing qubits and plaquettes |
//! | [`render`] | Scene rendering over a [`render::Surface`] |
//! | [`error`] | Stable error codes shared by every error type |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod circuit;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod extend;
pub mod geometry;
pub mod hit;
pub mod hull;
pub mod input;
pub mod lattice;
pub mod plaquette;
pub mod render;
pub mod selection;
pub mod workspace;
