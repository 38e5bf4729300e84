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

//! Ambient, reusable pieces of the terminal core: the UTF-8/width codec,
//! the colour palette and colour-key model, SGR attribute types, charset
//! translation, mode flags, and the layered `Config` object.
//!
//! Nothing in this crate touches a grid or a parser; those live in
//! `vt-core-buffer` and `vt-core-emulator` respectively and depend on
//! this crate for shared vocabulary.

pub mod charset;
pub mod codec;
pub mod colors;
pub mod config;
pub mod cursor;
pub mod modes;
pub mod sgr;

#[macro_use]
extern crate tracing;
