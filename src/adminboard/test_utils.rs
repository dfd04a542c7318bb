//! Payload builders shared by unit tests and, behind the `test_utils`
//! feature, by integration tests.

use crate::model::{
    Availability, Blog, Color, ContentBlock, Day, Donation, DonationType, Event, PricingType,
    Product, Size, User, Variant,
};
use chrono::{NaiveDate, NaiveTime};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date")
}

pub fn variant(size: Size, color: Color, price: f64, mrp: f64) -> Variant {
    Variant {
        size,
        color,
        price,
        mrp,
        available: Availability::Yes,
    }
}

pub fn product(title: &str) -> Product {
    Product {
        title: title.to_string(),
        description: Some(format!("About {}", title)),
        rating: 4.0,
        image: "data:image/png;base64,AAAA".to_string(),
        variants: vec![variant(Size::M, Color::Red, 10.0, 12.0)],
    }
}

pub fn event(title: &str, location: &str, pricing_type: PricingType, price: f64) -> Event {
    Event {
        title: title.to_string(),
        days: [Day::Mon, Day::Wed].into_iter().collect(),
        start_date: date("2025-04-01"),
        end_date: date("2025-04-30"),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("fixture time"),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).expect("fixture time"),
        location: location.to_string(),
        pricing_type,
        price,
        details: String::new(),
        image: "event.png".to_string(),
    }
}

pub fn blog(title: &str, on: Option<&str>) -> Blog {
    Blog {
        title: title.to_string(),
        date: on.map(date),
        image: "cover.png".to_string(),
        content: vec![ContentBlock::text(format!("{} body", title))],
    }
}

pub fn user(name: &str, email: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
        joined: date("2025-01-15"),
    }
}

pub fn donation(name: &str, amount: f64, on: &str) -> Donation {
    Donation {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        amount,
        date: date(on),
        message: None,
        donation_type: DonationType::OneOff,
    }
}
