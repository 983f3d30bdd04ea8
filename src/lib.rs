// Copyright 2026 the Rectclip Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping 2D Bézier paths to an axis-aligned rectangle.
//!
//! The most common region a renderer needs to clip against is a plain
//! rectangle, and running a general polygon-boolean engine for that case
//! is wasteful. This crate instead walks the subject path exactly once:
//! segments inside the clip window pass through untouched, segments that
//! cross a window edge are split at the crossing parameters (a closed-form
//! root find per axis, since the edges are axis-aligned), and the portions
//! outside are replaced by straight edges tracing the window boundary.
//! The trace follows the projection of the outside trajectory onto the
//! boundary, so winding numbers inside the window are preserved and the
//! clipped path fills the same region as the intersection of the input's
//! fill with the window, under either fill rule.
//!
//! # Example
//!
//! ```
//! use rectclip::{clip_to_rect, BezPath, ClipOpts, Rect};
//!
//! let mut triangle = BezPath::new();
//! triangle.move_to((0.0, 0.0));
//! triangle.line_to((300.0, 0.0));
//! triangle.line_to((150.0, 300.0));
//! triangle.close_path();
//!
//! let window = Rect::from_origin_size((100.0, 100.0), (100.0, 100.0));
//! let clipped = clip_to_rect(&triangle, window, &ClipOpts::default()).unwrap();
//! assert!((clipped.area() - 10_000.0).abs() < 1e-9);
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. Note that the crate still uses the `alloc` crate
//! regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(clippy::unreadable_literal, clippy::many_single_char_names)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("rectclip requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod bezpath;
mod clip;
pub mod common;
mod cubicbez;
mod line;
mod param_curve;
mod point;
mod quadbez;
mod rect;
mod size;
mod vec2;

pub use crate::affine::*;
pub use crate::bezpath::*;
pub use crate::clip::*;
pub use crate::cubicbez::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::rect::*;
pub use crate::size::*;
pub use crate::vec2::*;
