use serde::Deserialize;
use validator::Validate;

use crate::domain::agent::NewAgent;
use crate::domain::types::{AgentEmail, AgentName, AgentRole, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a sales agent.
pub struct AddAgentForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub role: String,
}

impl TryFrom<AddAgentForm> for NewAgent {
    type Error = FormError;

    fn try_from(form: AddAgentForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewAgent {
            name: AgentName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: AgentEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            role: AgentRole::new(form.role).map_err(|_| FormError::InvalidRole)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, phone: &str) -> AddAgentForm {
        AddAgentForm {
            name: " Priya Shah ".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            role: "Account Executive".to_string(),
        }
    }

    #[test]
    fn valid_form_is_normalized() {
        let agent = NewAgent::try_from(form("Priya@Example.com", "+44 20 7946 0958")).unwrap();

        assert_eq!(agent.name.as_str(), "Priya Shah");
        assert_eq!(agent.email.as_str(), "priya@example.com");
        assert_eq!(agent.phone.as_str(), "+442079460958");
    }

    #[test]
    fn invalid_email_fails_validation() {
        let result = NewAgent::try_from(form("priya", "+44 20 7946 0958"));
        assert!(matches!(result, Err(FormError::Validation(_))));
    }

    #[test]
    fn unparsable_phone_is_rejected() {
        let result = NewAgent::try_from(form("priya@example.com", "call me"));
        assert!(matches!(result, Err(FormError::InvalidPhoneNumber)));
    }
}
