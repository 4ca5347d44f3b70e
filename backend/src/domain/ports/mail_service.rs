//! Port for outbound mail notifications.
//!
//! Mutating endpoints notify an operator mailbox after destructive changes.
//! The shipped implementation only writes the mail to the log; a real
//! delivery channel can replace it behind the same port.

use tracing::info;

/// Domain port for sending notification mail.
#[cfg_attr(test, mockall::automock)]
pub trait MailService: Send + Sync {
    /// Send a message with the given subject to the operator mailbox.
    fn send(&self, subject: &str, message: &str);
}

/// Console-backed mail stub: logs the mail instead of delivering it.
#[derive(Debug, Clone)]
pub struct LocalMailService {
    mail_to: String,
    mail_from: String,
}

impl LocalMailService {
    /// Create a stub delivering to the default operator mailbox.
    pub fn new() -> Self {
        Self {
            mail_to: "admin@mycompany.com".to_owned(),
            mail_from: "noreply@mycompany.com".to_owned(),
        }
    }
}

impl Default for LocalMailService {
    fn default() -> Self {
        Self::new()
    }
}

impl MailService for LocalMailService {
    fn send(&self, subject: &str, message: &str) {
        info!(
            mail_from = %self.mail_from,
            mail_to = %self.mail_to,
            subject,
            message,
            "mail written to console in place of delivery"
        );
    }
}
