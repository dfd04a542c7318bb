//! # List Views
//!
//! A list page shows a derived, read-only slice of a store:
//!
//! ```text
//! records ──► search + structured filters (AND) ──► paginate ──► ListView
//! ```
//!
//! Everything here is a pure function of `(records, filter, paging)`. Callers
//! recompute the view explicitly after each change to the store or to the
//! filter state; nothing is cached and the store is never mutated.
//!
//! Page sizes per page: products, events and blogs are unpaginated
//! ([`Paging::All`]); users use [`USERS_PAGE_SIZE`]; donations use
//! [`DONATIONS_PAGE_SIZE`].

use crate::model::{Donation, DonationType, Record};

pub mod filter;
pub mod paging;

pub use filter::{
    BlogFilter, DateRange, DonationFilter, EventFilter, ListFilter, ProductFilter, UserFilter,
};
pub use paging::{paginate, Page, Paging, DONATIONS_PAGE_SIZE, USERS_PAGE_SIZE};

pub type ListView<T> = Page<Record<T>>;

/// Records passing `filter`, in store order.
pub fn filter_records<T, F>(records: &[Record<T>], filter: &F) -> Vec<Record<T>>
where
    T: Clone,
    F: ListFilter<T>,
{
    records
        .iter()
        .filter(|r| filter.matches(&r.data))
        .cloned()
        .collect()
}

pub fn list_view<T, F>(records: &[Record<T>], filter: &F, paging: Paging) -> ListView<T>
where
    T: Clone,
    F: ListFilter<T>,
{
    paginate(&filter_records(records, filter), paging)
}

/// Donation types present in `records`, first-seen order. Feeds the type
/// filter's options.
pub fn donation_types(records: &[Record<Donation>]) -> Vec<DonationType> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.donation_type) {
            seen.push(record.donation_type);
        }
    }
    seen
}
