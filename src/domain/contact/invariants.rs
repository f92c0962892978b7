use super::entity::ContactMessage;
use crate::domain::validation::{require_email, require_text};
use crate::domain::DomainResult;

pub fn validate_contact_message(message: &ContactMessage) -> DomainResult<()> {
    require_text("name", &message.name)?;
    require_email("email", &message.email)?;
    require_text("message", &message.message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_message() {
        let message = ContactMessage::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "Do you ship abroad?".to_string(),
        );
        assert!(validate_contact_message(&message).is_ok());
        assert!(!message.is_read);
    }

    #[test]
    fn test_bad_email_fails() {
        let message = ContactMessage::new(
            "Ada".to_string(),
            "ada".to_string(),
            "Hello".to_string(),
        );
        assert!(validate_contact_message(&message).is_err());
    }
}
