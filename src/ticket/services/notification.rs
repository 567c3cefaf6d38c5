//! New-ticket email notifications.

use crate::config::DeskConfig;
use crate::ticket::{
    domain::{Locale, Project, Ticket},
    ports::{MailError, MailTransport, OutgoingEmail},
};
use minijinja::{Environment, context};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const TEMPLATES: [(&str, &str); 4] = [
    ("new_ticket.en.html", include_str!("templates/new_ticket.en.html")),
    ("new_ticket.pt-BR.html", include_str!("templates/new_ticket.pt-BR.html")),
    (
        "new_ticket_subject.en.txt",
        include_str!("templates/new_ticket_subject.en.txt"),
    ),
    (
        "new_ticket_subject.pt-BR.txt",
        include_str!("templates/new_ticket_subject.pt-BR.txt"),
    ),
];

/// Contact details of the client who submitted a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContact {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl ClientContact {
    /// Creates contact details.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Addressing and language of outgoing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Recipient of new-ticket notifications.
    pub admin_email: String,
    /// Sender mailbox.
    pub sender: String,
    /// Email language.
    pub locale: Locale,
}

impl From<&DeskConfig> for NotificationSettings {
    fn from(config: &DeskConfig) -> Self {
        Self {
            admin_email: config.admin_email.clone(),
            sender: config.sender.clone(),
            locale: config.locale,
        }
    }
}

/// Errors raised while building or sending notifications.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// A template failed to compile or render.
    #[error("notification template error: {0}")]
    Template(#[from] minijinja::Error),
    /// The mail transport refused the message.
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Renders and sends new-ticket notifications to the support admin.
#[derive(Clone)]
pub struct TicketNotifier<M>
where
    M: MailTransport,
{
    transport: Arc<M>,
    templates: Environment<'static>,
    settings: NotificationSettings,
}

impl<M> TicketNotifier<M>
where
    M: MailTransport,
{
    /// Creates a notifier with the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when a bundled template does
    /// not compile.
    pub fn new(transport: Arc<M>, settings: NotificationSettings) -> Result<Self, NotificationError> {
        let mut templates = Environment::new();
        for (name, source) in TEMPLATES {
            templates.add_template(name, source)?;
        }
        Ok(Self {
            transport,
            templates,
            settings,
        })
    }

    /// Builds the notification for a newly submitted ticket.
    ///
    /// A missing project is shown with a localised placeholder name.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn render_new_ticket(
        &self,
        ticket: &Ticket,
        project: Option<&Project>,
        client: &ClientContact,
    ) -> Result<OutgoingEmail, NotificationError> {
        let locale = self.settings.locale;
        let project_name = project.map_or_else(
            || locale.unspecified_project().to_owned(),
            |found| found.name().as_str().to_owned(),
        );
        let values = context! {
            client_name => client.name.as_str(),
            client_email => client.email.as_str(),
            title => ticket.title().as_str(),
            description => ticket.description().as_str(),
            priority => locale.priority_label(ticket.priority()),
            submitted_at => ticket.created_at().format("%Y-%m-%d %H:%M UTC").to_string(),
            project_name => project_name,
        };

        let subject = self
            .templates
            .get_template(&format!("new_ticket_subject.{}.txt", locale.as_str()))?
            .render(&values)?;
        let html_body = self
            .templates
            .get_template(&format!("new_ticket.{}.html", locale.as_str()))?
            .render(&values)?;

        Ok(OutgoingEmail {
            from: self.settings.sender.clone(),
            to: self.settings.admin_email.clone(),
            subject: subject.trim().to_owned(),
            html_body,
        })
    }

    /// Renders and sends the new-ticket notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when rendering or delivery fails.
    pub async fn notify_new_ticket(
        &self,
        ticket: &Ticket,
        project: Option<&Project>,
        client: &ClientContact,
    ) -> Result<OutgoingEmail, NotificationError> {
        let email = self.render_new_ticket(ticket, project, client)?;
        self.transport.send(&email).await?;
        info!(ticket_id = %ticket.id(), to = %email.to, "new ticket notification sent");
        Ok(email)
    }
}
