use tracing::{info, warn};
use validator::Validate;

use crate::{
    entities::contact::{ContactAcknowledgement, ContactForm, CONTACT_ACKNOWLEDGEMENT},
    errors::AppError,
    limiter::rate_limiter::{RateDecision, RateLimiterStore},
};

/// Accepts contact form submissions. Messages are logged, never stored.
#[derive(Clone)]
pub struct ContactHandler {
    limiter: RateLimiterStore,
}

impl ContactHandler {
    pub fn new(limiter: RateLimiterStore) -> Self {
        ContactHandler { limiter }
    }

    pub fn limiter(&self) -> &RateLimiterStore {
        &self.limiter
    }

    pub fn submit(
        &self,
        client: &str,
        form: ContactForm,
    ) -> Result<ContactAcknowledgement, AppError> {
        form.validate()?;

        if let RateDecision::Limited { retry_after_secs } = self.limiter.check(client) {
            warn!(client, retry_after_secs, "Contact form rate limited");
            return Err(AppError::RateLimited(retry_after_secs));
        }

        info!(
            name = %form.name,
            email = %form.email,
            subject = form.subject.as_deref().unwrap_or(""),
            length = form.message.len(),
            "Contact form submitted"
        );

        Ok(ContactAcknowledgement { message: CONTACT_ACKNOWLEDGEMENT })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str) -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: email.into(),
            subject: None,
            message: "Hello there, let's work together.".into(),
        }
    }

    #[test]
    fn valid_form_is_acknowledged() {
        let handler = ContactHandler::new(RateLimiterStore::per_minute(5));
        let ack = handler.submit("1.1.1.1", form("ada@example.com")).unwrap();
        assert_eq!(ack.message, CONTACT_ACKNOWLEDGEMENT);
    }

    #[test]
    fn invalid_email_is_rejected_before_rate_limit() {
        let handler = ContactHandler::new(RateLimiterStore::per_minute(1));
        assert!(matches!(
            handler.submit("1.1.1.1", form("not-an-email")),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(handler.limiter().tracked_keys(), 0);
        assert!(handler.submit("1.1.1.1", form("ada@example.com")).is_ok());
        assert_eq!(handler.limiter().tracked_keys(), 1);
    }

    #[test]
    fn repeated_submissions_are_limited_per_client() {
        let handler = ContactHandler::new(RateLimiterStore::per_minute(1));
        assert!(handler.submit("1.1.1.1", form("ada@example.com")).is_ok());
        assert!(matches!(
            handler.submit("1.1.1.1", form("ada@example.com")),
            Err(AppError::RateLimited(_))
        ));
        assert!(handler.submit("2.2.2.2", form("ada@example.com")).is_ok());
    }
}
