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
#![allow(clippy::similar_names)]

//! A VT100/VT220-compatible terminal emulator core: byte-driven escape
//! parsing, screen model mutation, response encoding, selection, and
//! keyboard/mouse input encoding. No I/O, no rendering: `Emulator::feed`
//! takes host bytes and returns host-bound response bytes, and the
//! caller owns the PTY/socket/whatever moves those bytes around.

pub mod emulator;
pub mod error;
pub mod input;
pub mod parser;
pub mod response;
pub mod selection;

#[macro_use]
extern crate tracing;
