//! Human-facing labels for statuses, priorities and durations.

use super::{ParseLocaleError, TicketPriority, TicketStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language used for activity descriptions and notification emails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    En,
    /// Brazilian Portuguese.
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    /// Returns the BCP 47 tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::PtBr => "pt-BR",
        }
    }

    /// Returns the display label of a ticket status.
    #[must_use]
    pub const fn status_label(self, status: TicketStatus) -> &'static str {
        match (self, status) {
            (Self::En, TicketStatus::Open) => "Open",
            (Self::En, TicketStatus::Pending) => "Pending",
            (Self::En, TicketStatus::InProgress) => "In progress",
            (Self::En, TicketStatus::Closed) => "Closed",
            (Self::PtBr, TicketStatus::Open) => "Aberto",
            (Self::PtBr, TicketStatus::Pending) => "Pendente",
            (Self::PtBr, TicketStatus::InProgress) => "Em Andamento",
            (Self::PtBr, TicketStatus::Closed) => "Fechado",
        }
    }

    /// Returns the display label of a ticket priority.
    #[must_use]
    pub const fn priority_label(self, priority: TicketPriority) -> &'static str {
        match (self, priority) {
            (Self::En, TicketPriority::Low) => "Low",
            (Self::En, TicketPriority::Medium) => "Medium",
            (Self::En, TicketPriority::High) => "High",
            (Self::PtBr, TicketPriority::Low) => "Baixa",
            (Self::PtBr, TicketPriority::Medium) => "Média",
            (Self::PtBr, TicketPriority::High) => "Alta",
        }
    }

    /// Returns the placeholder used when a project cannot be resolved.
    #[must_use]
    pub const fn unspecified_project(self) -> &'static str {
        match self {
            Self::En => "Unspecified",
            Self::PtBr => "Não especificado",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = ParseLocaleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "pt" | "pt-br" => Ok(Self::PtBr),
            _ => Err(ParseLocaleError(value.to_owned())),
        }
    }
}

/// Formats a number of seconds as `HH:MM:SS`; hours grow past two digits.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds.div_euclid(3_600);
    let minutes = total_seconds.rem_euclid(3_600).div_euclid(60);
    let seconds = total_seconds.rem_euclid(60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
