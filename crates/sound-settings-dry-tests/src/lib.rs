// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles for the sound settings crates.
#![forbid(unsafe_code)]
//!
//! Every double is cheaply cloneable and clones share state, so a test can hand
//! one clone to a [`ScreenController`](sound_settings_core::ScreenController)
//! and inspect the other.
//!
//! # Modules
//!
//! - [`store`] - In-memory settings and property stores with write logs
//! - [`widgets`] - Recording widget host
//! - [`dialogs`] - Recording dialog host

pub mod dialogs;
pub mod store;
pub mod widgets;

pub use dialogs::RecordingDialogs;
pub use store::{InMemoryPropertyStore, InMemorySettingsStore, Write};
pub use widgets::{RecordingWidgets, WidgetState};
