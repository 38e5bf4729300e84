// Copyright (C) 2024-2026 The vt-core Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::range_plus_one)]

//! The screen model: `Cell`, `Row`, the box-drawing glyph-descriptor
//! table, and `Grid` (primary/alternate buffers, scrollback ring, dirty
//! tracking, tab stops, scroll regions).

pub mod boxdata;
pub mod cell;
pub mod grid;
pub mod row;

#[macro_use]
extern crate tracing;
