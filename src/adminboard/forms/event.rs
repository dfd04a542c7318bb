use super::{min_chars, non_empty, Form, ValidationErrors};
use crate::model::{Day, Event, PricingType};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub days: BTreeSet<Day>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: String,
    pub pricing_type: PricingType,
    /// Only read for paid events.
    pub price: Option<f64>,
    pub details: String,
    pub image: String,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            days: BTreeSet::new(),
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            location: String::new(),
            pricing_type: PricingType::Free,
            price: None,
            details: String::new(),
            image: String::new(),
        }
    }
}

impl Form for EventForm {
    type Output = Event;

    fn validate(&self) -> Result<Event, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            min_chars(&self.title, 2),
            "title",
            "Event title must be at least 2 characters.",
        );
        errors.check(!self.days.is_empty(), "days", "Please select at least one day.");
        errors.check(self.start_date.is_some(), "start_date", "Please select a start date.");
        errors.check(self.end_date.is_some(), "end_date", "Please select an end date.");
        errors.check(self.start_time.is_some(), "start_time", "Please select a start time.");
        errors.check(self.end_time.is_some(), "end_time", "Please select an end time.");
        errors.check(
            min_chars(&self.location, 2),
            "location",
            "Location must be at least 2 characters.",
        );
        let price = match self.pricing_type {
            PricingType::Paid => self.price.filter(|p| p.is_finite() && *p > 0.0),
            PricingType::Free => Some(0.0),
        };
        errors.check(price.is_some(), "price", "Price must be greater than 0.");
        errors.check(non_empty(&self.image), "image", "Please upload an image");

        match (
            self.start_date,
            self.end_date,
            self.start_time,
            self.end_time,
            price,
        ) {
            (Some(start_date), Some(end_date), Some(start_time), Some(end_time), Some(price))
                if errors.is_empty() =>
            {
                Ok(Event {
                    title: self.title.trim().to_string(),
                    days: self.days.clone(),
                    start_date,
                    end_date,
                    start_time,
                    end_time,
                    location: self.location.trim().to_string(),
                    pricing_type: self.pricing_type,
                    price,
                    details: self.details.clone(),
                    image: self.image.clone(),
                })
            }
            _ => Err(errors),
        }
    }

    fn from_entity(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            days: event.days.clone(),
            start_date: Some(event.start_date),
            end_date: Some(event.end_date),
            start_time: Some(event.start_time),
            end_time: Some(event.end_time),
            location: event.location.clone(),
            pricing_type: event.pricing_type,
            price: (event.pricing_type == PricingType::Paid).then_some(event.price),
            details: event.details.clone(),
            image: event.image.clone(),
        }
    }
}
