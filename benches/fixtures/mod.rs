// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

pub const HOME_ROW: &str = "sadjklewcmpgh";
pub const BINARY: &str = "ab";

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A sparse pane: fits in single-character labels.
    Small,
    /// A busy workspace.
    Medium,
    /// Far more targets than anyone would hint, to expose scaling.
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    pub fn targets(self) -> usize {
        match self {
            Case::Small => 12,
            Case::Medium => 150,
            Case::Large => 5_000,
        }
    }
}
