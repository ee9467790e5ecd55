//! Status bar messages and the symbols that mark them.

use std::fmt;

use ratatui::{
    style::{Color, Style},
    text::Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Progress,
    Info,
}

impl StatusKind {
    pub fn symbol(self) -> &'static str {
        match self {
            StatusKind::Success => "✓",
            StatusKind::Error => "✗",
            StatusKind::Progress => "⟳",
            StatusKind::Info => "ℹ",
        }
    }

    pub fn color(self) -> Color {
        match self {
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::LightRed,
            StatusKind::Progress => Color::Yellow,
            StatusKind::Info => Color::Cyan,
        }
    }
}

/// The line shown at the left of the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, text)
    }

    /// In-progress message, rendered with a trailing ellipsis: `⟳ Loading Invoices page 2...`
    pub fn progress(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Progress, format!("{}...", text.into()))
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, text)
    }

    /// The symbol coloured by kind, then the plain text.
    pub fn spans(&self) -> Vec<Span<'_>> {
        vec![
            Span::styled(self.kind.symbol(), Style::new().fg(self.kind.color())),
            Span::raw(" "),
            Span::raw(self.text.as_str()),
        ]
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::info("Ready | Press ? for help")
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.symbol(), self.text)
    }
}
