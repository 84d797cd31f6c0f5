//! SynthBrute theme and color utilities.

use emucon_query::NotificationLevel;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

/// Colour for the status strings AWS services report (`CREATE_COMPLETE`,
/// `ALARM`, `ENABLED`, `Active`, ...).
pub fn resource_status_color(status: &str, theme: &SynthBruteTheme) -> Color {
    let status = status.trim().to_ascii_uppercase();
    if status.contains("FAILED") || status.contains("ROLLBACK") || status == "ALARM" {
        theme.error
    } else if status.contains("IN_PROGRESS")
        || status.contains("PENDING")
        || status == "INSUFFICIENT_DATA"
        || status == "CREATING"
        || status == "UPDATING"
        || status == "DELETING"
    {
        theme.warning
    } else if status.ends_with("_COMPLETE")
        || status == "OK"
        || status == "ACTIVE"
        || status == "ENABLED"
    {
        theme.success
    } else if status == "DISABLED" || status == "INACTIVE" {
        theme.text_dim
    } else {
        theme.text
    }
}

pub fn notification_color(level: NotificationLevel, theme: &SynthBruteTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

pub fn notification_label(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "INFO",
        NotificationLevel::Warning => "WARN",
        NotificationLevel::Error => "ERROR",
        NotificationLevel::Success => "SUCCESS",
    }
}
