//! Viewport, object store and grid layout core for the Spline playground.
//!
//! The playground is an infinite canvas of request/schema/... cards plus a
//! grid-based block editor. This crate holds all of its spatial logic and
//! none of its drawing: hosts feed raw pointer, wheel and resize events into
//! [`engine::EngineCore`] or [`grid_editor::GridEditor`], apply the returned
//! [`engine::Action`]s, and render from [`render::scene`] /
//! [`render::grid_scene`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Canvas input handling over [`engine::EngineCore`] |
//! | [`grid_editor`] | Grid gestures over a [`grid::GridLayout`] |
//! | [`camera`] | Camera, viewport limits and coordinate conversions |
//! | [`grid`] | Grid blocks, overlap resolution, drag and resize |
//! | [`doc`] | World objects and the persisted object store |
//! | [`input`] | Input event types and gesture state machines |
//! | [`hit`] | Hit-testing cards, grips and grid handles |
//! | [`render`] | Card content and positioned scene output |
//! | [`config`] | Host-overridable limits and their validation |
//! | [`consts`] | Default limits and handle geometry |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod grid_editor;
pub mod hit;
pub mod input;
pub mod render;
