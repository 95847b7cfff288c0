// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

const THEME_VAR: &str = "GALATEA_THEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    fn parse(value: &str) -> Result<Self, ()> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TuiTheme {
    mode: ThemeMode,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self { mode: ThemeMode::Dark }
    }
}

impl TuiTheme {
    /// Initial theme; `GALATEA_THEME=light|dark` overrides the default.
    pub fn from_env() -> Result<Self, ThemeError> {
        match env::var(THEME_VAR) {
            Ok(value) if value.trim().is_empty() => Ok(Self::default()),
            Ok(value) => {
                let mode = ThemeMode::parse(&value).map_err(|()| ThemeError::InvalidEnv {
                    name: THEME_VAR.to_string(),
                    value,
                })?;
                Ok(Self { mode })
            }
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ThemeError::InvalidEnv {
                name: THEME_VAR.to_string(),
                value: "<non-unicode>".to_string(),
            }),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
    }

    pub fn base_style(&self) -> Style {
        match self.mode {
            ThemeMode::Light => Style::default().fg(Color::Black).bg(Color::White),
            ThemeMode::Dark => Style::default(),
        }
    }

    pub fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.accent())
        } else {
            self.base_style()
        }
    }

    pub fn tab_style(&self, active: bool) -> Style {
        if active {
            self.base_style().fg(self.accent()).add_modifier(Modifier::BOLD)
        } else {
            self.base_style().add_modifier(Modifier::DIM)
        }
    }

    pub fn user_style(&self) -> Style {
        self.base_style().fg(match self.mode {
            ThemeMode::Light => Color::Blue,
            ThemeMode::Dark => Color::LightBlue,
        })
    }

    pub fn assistant_style(&self) -> Style {
        self.base_style()
    }

    pub fn busy_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::DIM | Modifier::ITALIC)
    }

    pub fn error_style(&self) -> Style {
        self.base_style().fg(match self.mode {
            ThemeMode::Light => Color::Red,
            ThemeMode::Dark => Color::LightRed,
        })
    }

    pub fn hint_key_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub fn hint_label_style(&self) -> Style {
        self.base_style().fg(Color::Gray)
    }

    fn accent(&self) -> Color {
        match self.mode {
            ThemeMode::Light => Color::Green,
            ThemeMode::Dark => Color::LightGreen,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => {
                write!(f, "invalid env {name}={value} (expected light or dark)")
            }
        }
    }
}

impl Error for ThemeError {}
