//! Projects and their support-hour budgets.

use super::{ParseProjectStatusError, ProjectId, TicketDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_HOUR: u64 = 3_600;

/// Administrative label for a project's lifecycle.
///
/// The label is informational; archived projects still accept tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Project is live.
    #[default]
    Active,
    /// Project has been archived.
    Archived,
}

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Cap on cumulative in-progress time across a project's tickets.
///
/// Stored in whole seconds so the budget comparison is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportHourLimit(u64);

impl SupportHourLimit {
    /// Creates a limit of whole hours.
    #[must_use]
    pub const fn from_hours(hours: u32) -> Self {
        Self(hours as u64 * SECONDS_PER_HOUR)
    }

    /// Creates a limit from a number of seconds.
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the limit in seconds.
    #[must_use]
    pub const fn as_seconds(self) -> u64 {
        self.0
    }

    /// Returns whether `spent_seconds` meets or exceeds the limit.
    #[must_use]
    pub const fn is_reached_by(self, spent_seconds: u64) -> bool {
        spent_seconds >= self.0
    }

    /// Returns the seconds left before the limit is reached.
    #[must_use]
    pub const fn remaining_after(self, spent_seconds: u64) -> u64 {
        self.0.saturating_sub(spent_seconds)
    }
}

/// Longest accepted project name, in characters.
pub const MAX_PROJECT_NAME_LENGTH: usize = 255;

/// Non-empty, trimmed project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyProjectName`] when the value is blank
    /// and [`TicketDomainError::ProjectNameTooLong`] past
    /// [`MAX_PROJECT_NAME_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TicketDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TicketDomainError::EmptyProjectName);
        }
        let length = trimmed.chars().count();
        if length > MAX_PROJECT_NAME_LENGTH {
            return Err(TicketDomainError::ProjectNameTooLong {
                max: MAX_PROJECT_NAME_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client project that tickets are billed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    status: ProjectStatus,
    support_limit: Option<SupportHourLimit>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted support-hour limit, if any.
    pub support_limit: Option<SupportHourLimit>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates an active project without a support-hour limit.
    #[must_use]
    pub fn new(name: ProjectName, clock: &impl Clock) -> Self {
        Self {
            id: ProjectId::new(),
            name,
            status: ProjectStatus::Active,
            support_limit: None,
            created_at: clock.utc(),
        }
    }

    /// Sets the support-hour limit.
    #[must_use]
    pub const fn with_support_limit(mut self, limit: SupportHourLimit) -> Self {
        self.support_limit = Some(limit);
        self
    }

    /// Sets the project status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            status: data.status,
            support_limit: data.support_limit,
            created_at: data.created_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the support-hour limit, if any.
    #[must_use]
    pub const fn support_limit(&self) -> Option<SupportHourLimit> {
        self.support_limit
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
