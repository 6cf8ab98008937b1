// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyhint: keyboard hint labels and incremental hint selection.
//!
//! [`hints`] generates prefix-free labels, [`session`] turns keystrokes into narrowing,
//! activation, and cancellation, and [`tui`] hosts both in a terminal demo.

pub mod config;
pub mod hints;
pub mod session;
pub mod tui;

pub use config::HintSettings;
pub use hints::{generate, Alphabet};
pub use session::{HintMatch, Key, SelectionSession, SessionError, SessionEvent};
