//! Identifier newtypes for tickets and the records that reference them.
//!
//! Each identifier wraps a UUID so that a client reference can never be passed
//! where a project or assignee reference is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares a UUID-backed identifier with the shared constructor set.
macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $noun:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $noun, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $noun, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a support ticket.
    TicketId,
    "ticket"
);

uuid_identifier!(
    /// Identifier of the portal client that submitted a ticket.
    ClientId,
    "client"
);

uuid_identifier!(
    /// Identifier of the project a ticket is billed against.
    ProjectId,
    "project"
);

uuid_identifier!(
    /// Identifier of a support staff member.
    UserId,
    "user"
);

uuid_identifier!(
    /// Identifier of an append-only time log row.
    TimeLogId,
    "time log"
);

uuid_identifier!(
    /// Identifier of an activity trail entry.
    ActivityLogId,
    "activity log"
);

uuid_identifier!(
    /// Identifier of a ticket comment.
    CommentId,
    "comment"
);
