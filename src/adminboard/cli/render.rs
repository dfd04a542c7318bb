//! Terminal output for list pages and detail views.
//!
//! Rendering returns `String`s so tests can check layout without a terminal;
//! the `print_*` wrappers are the only functions that touch stdout. Column
//! widths are measured with `unicode-width`, so names with wide characters
//! still line up.

use adminboard::api::{CmdMessage, MessageLevel};
use adminboard::config::{AdminConfig, CONFIG_KEYS};
use adminboard::model::{Blog, Donation, Entity, Event, Product, Record, User};
use adminboard::view::ListView;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 40;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An entity that can be shown as a table row and as a detail view.
pub(super) trait Tabular: Entity {
    const HEADERS: &'static [&'static str];
    const EMPTY: &'static str;

    fn cells(&self) -> Vec<String>;

    fn fields(&self) -> Vec<(&'static str, String)>;

    /// Indented lines under the row (variants, content blocks).
    fn children(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Tabular for Product {
    const HEADERS: &'static [&'static str] = &["Title", "Rating", "Variants"];
    const EMPTY: &'static str = "No products found.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            format!("{:.1}", self.rating),
            self.variants.len().to_string(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Rating", format!("{:.1}", self.rating)),
            ("Image", self.image.clone()),
        ]
    }

    fn children(&self) -> Vec<String> {
        self.variants
            .iter()
            .enumerate()
            .map(|(i, v)| {
                format!(
                    "{}. {:<4} {:<7} ${} (MRP ${}) available: {}",
                    i + 1,
                    v.size,
                    v.color,
                    v.price,
                    v.mrp,
                    v.available
                )
            })
            .collect()
    }
}

impl Tabular for Event {
    const HEADERS: &'static [&'static str] = &["Title", "Location", "Dates", "Time", "Price"];
    const EMPTY: &'static str = "No events found.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.location.clone(),
            format!(
                "{} to {}",
                self.start_date.format(DATE_FORMAT),
                self.end_date.format(DATE_FORMAT)
            ),
            format!(
                "{}-{}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            ),
            self.price_label(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let days: Vec<&str> = self.days.iter().map(|d| d.as_str()).collect();
        let mut fields = vec![("Title", self.title.clone()), ("Location", self.location.clone())];
        fields.extend(
            Self::HEADERS[2..]
                .iter()
                .copied()
                .zip(self.cells().into_iter().skip(2)),
        );
        fields.push(("Days", days.join(", ")));
        fields.push(("Details", self.details.clone()));
        fields.push(("Image", self.image.clone()));
        fields
    }
}

impl Tabular for Blog {
    const HEADERS: &'static [&'static str] = &["Title", "Date", "Blocks"];
    const EMPTY: &'static str = "No blog posts found.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.content.len().to_string(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let cells = self.cells();
        vec![
            ("Title", self.title.clone()),
            ("Date", cells[1].clone()),
            ("Image", self.image.clone()),
        ]
    }

    fn children(&self) -> Vec<String> {
        self.content
            .iter()
            .enumerate()
            .map(|(i, block)| match &block.image {
                Some(image) => format!("{}. {} [{}]", i + 1, block.text, image),
                None => format!("{}. {}", i + 1, block.text),
            })
            .collect()
    }
}

impl Tabular for User {
    const HEADERS: &'static [&'static str] = &["Name", "Email", "Joined"];
    const EMPTY: &'static str = "No users found.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.joined.format(DATE_FORMAT).to_string(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        Self::HEADERS.iter().copied().zip(self.cells()).collect()
    }
}

impl Tabular for Donation {
    const HEADERS: &'static [&'static str] = &["Name", "Email", "Amount", "Date", "Type"];
    const EMPTY: &'static str = "No donations found.";

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            format!("${:.2}", self.amount),
            self.date.format(DATE_FORMAT).to_string(),
            self.donation_type.to_string(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields: Vec<_> = Self::HEADERS.iter().copied().zip(self.cells()).collect();
        fields.push(("Message", self.message.clone().unwrap_or_default()));
        fields
    }
}

pub(super) fn render_list<T: Tabular>(view: &ListView<T>) -> String {
    let mut output = String::new();

    if view.items.is_empty() {
        output.push_str(&format!("{}\n", T::EMPTY));
    } else {
        let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.width()).collect();
        let rows: Vec<Vec<String>> = view
            .items
            .iter()
            .map(|record| {
                record
                    .cells()
                    .iter()
                    .map(|c| truncate_to_width(c, MAX_CELL_WIDTH))
                    .collect()
            })
            .collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let ordinal_width = (view.first_ordinal() + rows.len()).to_string().len() + 2;
        let header = format!(
            "{}{}  {}",
            " ".repeat(ordinal_width),
            join_padded(T::HEADERS.iter().map(|h| h.to_string()), &widths),
            "ID"
        );
        output.push_str(&format!("{}\n", header.trim_end().bold()));

        for (offset, (record, row)) in view.items.iter().zip(&rows).enumerate() {
            let ordinal = format!("{}.", view.first_ordinal() + offset);
            output.push_str(&format!(
                "{:<ordinal_width$}{}  {}\n",
                ordinal,
                join_padded(row.iter().cloned(), &widths),
                record.id.to_string().dimmed(),
                ordinal_width = ordinal_width
            ));
            for child in record.children() {
                output.push_str(&format!("{}  {}\n", " ".repeat(ordinal_width), child));
            }
        }
    }

    if let Some(size) = view.page_size {
        output.push_str(&format!(
            "{}\n",
            format!(
                "Page {} of {} ({} {} per page, {} total)",
                view.number,
                view.total_pages,
                size,
                if size == 1 { "item" } else { "items" },
                view.total_items
            )
            .dimmed()
        ));
        if view.has_next() {
            output.push_str(&format!(
                "{}\n",
                format!("Next: --page {}", view.number + 1).dimmed()
            ));
        }
    }

    output
}

pub(super) fn render_record<T: Tabular>(record: &Record<T>) -> String {
    let fields = record.fields();
    let label_width = fields
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0)
        .max(2);

    let mut output = format!(
        "{}{}  {}\n",
        "ID".bold(),
        " ".repeat(label_width - 2),
        record.id.to_string().yellow()
    );
    for (label, value) in fields {
        output.push_str(&format!(
            "{}{}  {}\n",
            label.bold(),
            " ".repeat(label_width - label.width()),
            value
        ));
    }

    let children = record.children();
    if !children.is_empty() {
        output.push('\n');
        for child in children {
            output.push_str(&format!("  {}\n", child));
        }
    }
    output
}

pub(super) fn render_config(config: &AdminConfig) -> String {
    CONFIG_KEYS
        .iter()
        .filter_map(|key| config.get(key).ok().map(|value| format!("{}={}\n", key, value)))
        .collect()
}

pub(super) fn render_messages(messages: &[CmdMessage]) -> String {
    let mut output = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
        };
        output.push_str(&format!("{}\n", line));
    }
    output
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn join_padded(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width()))))
        .collect::<Vec<_>>()
        .join("  ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminboard::model::{
        Availability, Color, ContentBlock, Day, DonationType, PricingType, Size, Variant,
    };
    use adminboard::view::{paginate, Paging};
    use chrono::{NaiveDate, NaiveTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn product(title: &str) -> Product {
        Product {
            title: title.to_string(),
            description: None,
            rating: 4.0,
            image: "widget.png".to_string(),
            variants: vec![Variant {
                size: Size::M,
                color: Color::Red,
                price: 10.0,
                mrp: 12.0,
                available: Availability::Yes,
            }],
        }
    }

    fn event(title: &str, location: &str, pricing_type: PricingType, price: f64) -> Event {
        Event {
            title: title.to_string(),
            days: [Day::Sat].into_iter().collect(),
            start_date: date("2025-04-01"),
            end_date: date("2025-04-01"),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            location: location.to_string(),
            pricing_type,
            price,
            details: String::new(),
            image: "event.png".to_string(),
        }
    }

    fn blog(title: &str, on: &str) -> Blog {
        Blog {
            title: title.to_string(),
            date: Some(date(on)),
            image: "cover.png".to_string(),
            content: vec![ContentBlock::text(format!("{} body", title))],
        }
    }

    fn user(name: &str, email: &str) -> User {
        User {
            name: name.to_string(),
            email: email.to_string(),
            joined: date("2025-01-15"),
        }
    }

    fn donation(name: &str, amount: f64, on: &str) -> Donation {
        Donation {
            name: name.to_string(),
            email: "donor@example.com".to_string(),
            amount,
            date: date(on),
            message: None,
            donation_type: DonationType::OneOff,
        }
    }

    fn plain() {
        colored::control::set_override(false);
    }

    fn records<T>(items: Vec<T>) -> Vec<Record<T>> {
        items.into_iter().map(Record::new).collect()
    }

    #[test]
    fn product_rows_include_variants() {
        plain();
        let view = paginate(&records(vec![product("Professional Widget")]), Paging::All);
        let output = render_list(&view);
        assert!(output.contains("Professional Widget"));
        assert!(output.contains("1. m    red     $10 (MRP $12) available: yes"));
        assert!(!output.contains("Page"));
    }

    #[test]
    fn paid_event_shows_dollar_price() {
        plain();
        let view = paginate(
            &records(vec![
                event("Charity Run", "City Park", PricingType::Paid, 25.0),
                event("Open Day", "Town Hall", PricingType::Free, 0.0),
            ]),
            Paging::All,
        );
        let output = render_list(&view);
        assert!(output.contains("$25"));
        assert!(output.contains("Free"));
    }

    #[test]
    fn paged_lists_show_footer_and_ordinals() {
        plain();
        let users: Vec<User> = (1..=7)
            .map(|i| user(&format!("User {}", i), &format!("u{}@example.com", i)))
            .collect();
        let rows = records(users);
        let view = paginate(&rows, Paging::page(2, 5));
        let output = render_list(&view);
        assert!(output.contains("6."));
        assert!(output.contains("User 7"));
        assert!(!output.contains("User 5"));
        assert!(output.contains("Page 2 of 2 (5 items per page, 7 total)"));
        assert!(!output.contains("Next:"));

        let first = render_list(&paginate(&rows, Paging::page(1, 5)));
        assert!(first.contains("Next: --page 2"));
    }

    #[test]
    fn empty_list_message() {
        plain();
        let view = paginate(&Vec::<Record<Donation>>::new(), Paging::page(1, 10));
        let output = render_list(&view);
        assert!(output.starts_with("No donations found."));
        assert!(output.contains("Page 1 of 0"));
    }

    #[test]
    fn blog_detail_lists_blocks() {
        plain();
        let record = Record::new(blog("Spring Gala", "2025-03-02"));
        let output = render_record(&record);
        assert!(output.contains(&record.id.to_string()));
        assert!(output.contains("2025-03-02"));
        assert!(output.contains("1. Spring Gala body"));
    }

    #[test]
    fn donation_detail_has_type() {
        plain();
        let output = render_record(&Record::new(donation("Ada", 50.0, "2025-03-01")));
        assert!(output.contains("$50.00"));
        assert!(output.contains("one-off donation"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(60);
        let cut = truncate_to_width(&long, 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn config_lists_every_key() {
        let output = render_config(&AdminConfig::default());
        assert!(output.contains("users-page-size=5\n"));
        assert!(output.contains("donations-page-size=10\n"));
        assert_eq!(output.lines().count(), CONFIG_KEYS.len());
    }
}
