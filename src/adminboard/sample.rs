//! Reference rows shown by the users and donation-history pages before any
//! real data exists. Not a store; `seed` copies them into one.

use crate::model::{Donation, DonationType, User};
use chrono::NaiveDate;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

const PEOPLE: &[(&str, &str)] = &[
    ("John Smith", "john.smith@example.com"),
    ("Sarah Johnson", "sarah.j@example.com"),
    ("Michael Brown", "mbrown@example.com"),
    ("Emily Davis", "emily.davis@example.com"),
    ("Robert Wilson", "rwilson@example.com"),
    ("Jennifer Lee", "jlee@example.com"),
    ("David Miller", "dmiller@example.com"),
    ("Lisa Anderson", "lisa.a@example.com"),
];

pub fn users() -> Vec<User> {
    let joined = [
        ymd(2025, 1, 15),
        ymd(2025, 1, 20),
        ymd(2025, 2, 5),
        ymd(2025, 2, 10),
        ymd(2025, 2, 15),
        ymd(2025, 2, 20),
        ymd(2025, 3, 1),
        ymd(2025, 3, 10),
    ];
    PEOPLE
        .iter()
        .zip(joined)
        .map(|(&(name, email), joined)| User {
            name: name.to_string(),
            email: email.to_string(),
            joined,
        })
        .collect()
}

pub fn donations() -> Vec<Donation> {
    use DonationType::*;

    let rows: [(f64, NaiveDate, &str, DonationType); 8] = [
        (250.0, ymd(2025, 3, 15), "Keep up the great work!", OneOff),
        (100.0, ymd(2025, 3, 14), "Happy to support your cause.", OneOff),
        (500.0, ymd(2025, 3, 12), "For the children's education program.", Funder),
        (75.0, ymd(2025, 3, 10), "", Equipment),
        (1000.0, ymd(2025, 3, 8), "Annual donation for your foundation.", Funder),
        (150.0, ymd(2025, 3, 5), "In memory of my father.", Equipment),
        (300.0, ymd(2025, 3, 3), "To support the new building project.", OneOff),
        (50.0, ymd(2025, 3, 1), "Monthly contribution.", OneOff),
    ];
    PEOPLE
        .iter()
        .zip(rows)
        .map(|(&(name, email), (amount, date, message, donation_type))| Donation {
            name: name.to_string(),
            email: email.to_string(),
            amount,
            date,
            message: (!message.is_empty()).then(|| message.to_string()),
            donation_type,
        })
        .collect()
}
