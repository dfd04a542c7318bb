use super::{looks_like_email, min_chars, Form, ValidationErrors};
use crate::model::User;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub joined: Option<NaiveDate>,
}

impl Form for UserForm {
    type Output = User;

    fn validate(&self) -> Result<User, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            min_chars(&self.name, 2),
            "name",
            "Name must be at least 2 characters.",
        );
        errors.check(
            looks_like_email(&self.email),
            "email",
            "Please enter a valid email address.",
        );
        errors.check(self.joined.is_some(), "joined", "Please select a join date.");

        match self.joined {
            Some(joined) if errors.is_empty() => Ok(User {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                joined,
            }),
            _ => Err(errors),
        }
    }

    fn from_entity(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            joined: Some(user.joined),
        }
    }
}
