// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend gateways for the access-control topology.
//!
//! A gateway stores one topology document per event. Two gateways are
//! provided:
//!
//! - `MemoryGateway` keeps serialized documents in memory and can be
//!   switched offline to simulate an unreachable backend
//! - `JsonFileGateway` keeps one `<event-id>.json` file per event
//!
//! Both store the same JSON document shape, so a topology written by one
//! can be read by the other.

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

mod backend;
mod error;

#[cfg(test)]
mod tests;

pub use backend::{EventGateway, JsonFileGateway, MemoryGateway};
pub use error::PersistenceError;
