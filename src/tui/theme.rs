// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

pub(crate) const PALETTE_ENV: &str = "KEYHINT_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<MarkerPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    fn marker_fg(&self) -> Color {
        self.palette.as_ref().map_or(Color::Black, |palette| palette.fg)
    }

    fn marker_bg(&self) -> Color {
        self.palette.as_ref().map_or(Color::Yellow, |palette| palette.bg)
    }

    /// Untyped remainder of a hint marker.
    pub(crate) fn marker_style(&self) -> Style {
        Style::default().fg(self.marker_fg()).bg(self.marker_bg()).add_modifier(Modifier::BOLD)
    }

    /// Already typed prefix of a hint marker.
    pub(crate) fn marker_typed_style(&self) -> Style {
        let typed_fg = self.palette.as_ref().map_or(Color::DarkGray, |palette| palette.typed_fg);
        Style::default().fg(typed_fg).bg(self.marker_bg())
    }

    pub(crate) fn button_border_style(&self, pressed: bool) -> Style {
        if pressed {
            Style::default().fg(Color::LightGreen)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        Style::default().fg(Color::Gray)
    }

    pub(crate) fn input_style(&self) -> Style {
        Style::default().fg(self.marker_bg()).add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkerPalette {
    fg: Color,
    bg: Color,
    typed_fg: Color,
}

impl MarkerPalette {
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let [fg, bg, typed_fg] = parts.as_slice() else {
            return Err(format!(
                "expected 3 comma-separated colors (fg,bg,typed_fg), got {}",
                parts.len()
            ));
        };

        Ok(Self {
            fg: parse_palette_color(fg)?,
            bg: parse_palette_color(bg)?,
            typed_fg: parse_palette_color(typed_fg)?,
        })
    }
}

fn palette_override_from_env() -> Result<Option<MarkerPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = MarkerPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV.to_owned(),
        value: format!("{trimmed} ({error})"),
    })?;

    Ok(Some(parsed))
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels = rest
            .split('/')
            .map(|channel| {
                u8::from_str_radix(channel, 16)
                    .map_err(|_| format!("invalid rgb: component {channel}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let [r, g, b] = channels.as_slice() else {
            return Err(format!("invalid rgb: value: {trimmed}"));
        };
        return Ok(Color::Rgb(*r, *g, *b));
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
