//! # Data Model
//!
//! Every persisted entity is wrapped in a [`Record`]: a generated UUID plus the
//! entity payload, flattened together on disk. The payload types ([`Product`],
//! [`Event`], [`Blog`], [`User`], [`Donation`]) carry no identity of their own,
//! which is what lets the add forms produce them before an id exists.
//!
//! Child collections ([`Variant`], [`ContentBlock`]) are owned by their parent
//! and have no id or lifecycle of their own.
//!
//! ## Storage boundary
//!
//! The [`Entity`] trait names the shape a snapshot is *read* as
//! ([`Entity::Stored`]) separately from the shape it is written as. For most
//! entities the two are identical. Blogs written by older versions stored their
//! body as a plain list of strings; [`StoredContent`] accepts both shapes and
//! [`Entity::upgrade`] turns old ones into structured blocks.

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// An entity type that owns a persisted store.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// Human readable kind, used in messages ("Product not found: ...").
    const KIND: &'static str;

    /// Key of the snapshot entry holding this entity's collection.
    const STORE_NAME: &'static str;

    /// Shape accepted when reading a snapshot.
    type Stored: DeserializeOwned;

    /// Bring a stored value up to the current shape.
    fn upgrade(stored: Self::Stored) -> Upgrade<Self>;

    /// Short name used in messages: a title or a person's name.
    fn label(&self) -> &str;
}

/// Result of reading one stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum Upgrade<T> {
    Current(T),
    Migrated(T),
}

impl<T> Upgrade<T> {
    pub fn is_migrated(&self) -> bool {
        matches!(self, Upgrade::Migrated(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Upgrade::Current(value) | Upgrade::Migrated(value) => value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Upgrade<U> {
        match self {
            Upgrade::Current(value) => Upgrade::Current(f(value)),
            Upgrade::Migrated(value) => Upgrade::Migrated(f(value)),
        }
    }
}

/// A stored entity: generated identifier plus payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(data: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
        }
    }

    pub fn with_id(id: Uuid, data: T) -> Self {
        Self { id, data }
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Closed set of string codes with serde, `Display` and `FromStr` agreeing
/// on the same spelling.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

// --- Products ---

string_enum!(
    /// Size code of a product variant.
    Size, "size" {
        S => "s",
        M => "m",
        L => "l",
        Xl => "xl",
        Xxl => "xxl",
        All => "all",
    }
);

string_enum!(
    Color, "color" {
        Black => "black",
        White => "white",
        Red => "red",
        Blue => "blue",
        Green => "green",
        Yellow => "yellow",
    }
);

string_enum!(
    Availability, "availability" {
        Yes => "yes",
        No => "no",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub size: Size,
    pub color: Color,
    pub price: f64,
    pub mrp: f64,
    pub available: Availability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rating: f64,
    pub image: String,
    pub variants: Vec<Variant>,
}

impl Entity for Product {
    const KIND: &'static str = "Product";
    const STORE_NAME: &'static str = "product-store";
    type Stored = Product;

    fn upgrade(stored: Product) -> Upgrade<Self> {
        Upgrade::Current(stored)
    }

    fn label(&self) -> &str {
        &self.title
    }
}

// --- Events ---

string_enum!(
    /// Weekday code, ordered Monday first.
    Day, "day" {
        Mon => "mon",
        Tue => "tue",
        Wed => "wed",
        Thu => "thu",
        Fri => "fri",
        Sat => "sat",
        Sun => "sun",
    }
);

string_enum!(
    PricingType, "pricing type" {
        Free => "free",
        Paid => "paid",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub days: BTreeSet<Day>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub location: String,
    pub pricing_type: PricingType,
    /// Always 0 for free events.
    pub price: f64,
    #[serde(default)]
    pub details: String,
    pub image: String,
}

impl Event {
    /// Price column as shown in the events list: "Free" or "$25".
    pub fn price_label(&self) -> String {
        match self.pricing_type {
            PricingType::Free => "Free".to_string(),
            PricingType::Paid => format!("${}", self.price),
        }
    }
}

impl Entity for Event {
    const KIND: &'static str = "Event";
    const STORE_NAME: &'static str = "event-store";
    type Stored = Event;

    fn upgrade(stored: Event) -> Upgrade<Self> {
        Upgrade::Current(stored)
    }

    fn label(&self) -> &str {
        &self.title
    }
}

// --- Blogs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub text: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_string_as_none"
    )]
    pub image: Option<String>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub title: String,
    #[serde(default, deserialize_with = "empty_string_as_no_date")]
    pub date: Option<NaiveDate>,
    pub image: String,
    pub content: Vec<ContentBlock>,
}

/// Blog body as found in a snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredContent {
    Blocks(Vec<ContentBlock>),
    Legacy(Vec<String>),
}

impl StoredContent {
    pub fn into_blocks(self) -> Upgrade<Vec<ContentBlock>> {
        match self {
            StoredContent::Blocks(blocks) => Upgrade::Current(blocks),
            StoredContent::Legacy(paragraphs) => {
                Upgrade::Migrated(paragraphs.into_iter().map(ContentBlock::text).collect())
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredBlog {
    pub title: String,
    #[serde(default, deserialize_with = "empty_string_as_no_date")]
    pub date: Option<NaiveDate>,
    pub image: String,
    pub content: StoredContent,
}

impl Entity for Blog {
    const KIND: &'static str = "Blog";
    const STORE_NAME: &'static str = "blog-store";
    type Stored = StoredBlog;

    fn upgrade(stored: StoredBlog) -> Upgrade<Self> {
        let StoredBlog {
            title,
            date,
            image,
            content,
        } = stored;
        content.into_blocks().map(|content| Blog {
            title,
            date,
            image,
            content,
        })
    }

    fn label(&self) -> &str {
        &self.title
    }
}

// --- Users ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub joined: NaiveDate,
}

impl Entity for User {
    const KIND: &'static str = "User";
    const STORE_NAME: &'static str = "user-store";
    type Stored = User;

    fn upgrade(stored: User) -> Upgrade<Self> {
        Upgrade::Current(stored)
    }

    fn label(&self) -> &str {
        &self.name
    }
}

// --- Donations ---

string_enum!(
    DonationType, "donation type" {
        OneOff => "one-off donation",
        Funder => "funder",
        Equipment => "donate equipment",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub name: String,
    pub email: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_string_as_none"
    )]
    pub message: Option<String>,
    pub donation_type: DonationType,
}

impl Entity for Donation {
    const KIND: &'static str = "Donation";
    const STORE_NAME: &'static str = "donation-store";
    type Stored = Donation;

    fn upgrade(stored: Donation) -> Upgrade<Self> {
        Upgrade::Current(stored)
    }

    fn label(&self) -> &str {
        &self.name
    }
}

// --- Serde helpers ---

pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

fn empty_string_as_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn empty_string_as_no_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
