// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Editing sessions over an event's access-control topology.
//!
//! A [`Repository`] owns the current topology snapshot of one event. Every
//! mutation produces a new immutable snapshot, publishes it to subscribers
//! and queues it for a background save through an [`EventGateway`].
//!
//! [`EventGateway`]: accessmap_persistence::EventGateway

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

mod error;
mod input;
mod notification;
mod repository;
mod sync;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use input::{parse_access_types, parse_direction, parse_entity_id};
pub use notification::{Notification, NotificationLevel};
pub use repository::Repository;
