use super::{looks_like_email, min_chars, non_negative, optional_text, Form, ValidationErrors};
use crate::model::{Donation, DonationType};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct DonationForm {
    pub name: String,
    pub email: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    pub message: String,
    pub donation_type: DonationType,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            amount: 0.0,
            date: None,
            message: String::new(),
            donation_type: DonationType::OneOff,
        }
    }
}

impl Form for DonationForm {
    type Output = Donation;

    fn validate(&self) -> Result<Donation, ValidationErrors> {
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
        errors.check(non_negative(self.amount), "amount", "Amount must be positive");
        errors.check(self.date.is_some(), "date", "Please select a date.");

        match self.date {
            Some(date) if errors.is_empty() => Ok(Donation {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                amount: self.amount,
                date,
                message: optional_text(&self.message),
                donation_type: self.donation_type,
            }),
            _ => Err(errors),
        }
    }

    fn from_entity(donation: &Donation) -> Self {
        Self {
            name: donation.name.clone(),
            email: donation.email.clone(),
            amount: donation.amount,
            date: Some(donation.date),
            message: donation.message.clone().unwrap_or_default(),
            donation_type: donation.donation_type,
        }
    }
}
