use crate::model::{Blog, Donation, DonationType, Event, PricingType, Product, User};
use chrono::NaiveDate;

/// A predicate over one entity payload. Filters hold only UI state (search
/// term, selected type, date bounds) and never touch a store.
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Inclusive `[from, to]` range; an unset bound imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_set(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Undated items only pass while no bound is set.
    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        match date {
            Some(date) => self.contains(date),
            None => !self.is_set(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: String,
}

impl ListFilter<Product> for ProductFilter {
    fn matches(&self, item: &Product) -> bool {
        contains_ci(&item.title, &self.search)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Matched against title and location.
    pub search: String,
    /// `None` shows free and paid events.
    pub pricing: Option<PricingType>,
}

impl ListFilter<Event> for EventFilter {
    fn matches(&self, item: &Event) -> bool {
        let text =
            contains_ci(&item.title, &self.search) || contains_ci(&item.location, &self.search);
        let pricing = self.pricing.is_none_or(|p| p == item.pricing_type);
        text && pricing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub search: String,
    pub dates: DateRange,
}

impl ListFilter<Blog> for BlogFilter {
    fn matches(&self, item: &Blog) -> bool {
        contains_ci(&item.title, &self.search) && self.dates.contains_opt(item.date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Matched against name and email.
    pub search: String,
}

impl ListFilter<User> for UserFilter {
    fn matches(&self, item: &User) -> bool {
        contains_ci(&item.name, &self.search) || contains_ci(&item.email, &self.search)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationFilter {
    /// Matched against name and email.
    pub search: String,
    /// `None` is "All Types".
    pub donation_type: Option<DonationType>,
    pub dates: DateRange,
}

impl ListFilter<Donation> for DonationFilter {
    fn matches(&self, item: &Donation) -> bool {
        let text = contains_ci(&item.name, &self.search) || contains_ci(&item.email, &self.search);
        let kind = self.donation_type.is_none_or(|t| t == item.donation_type);
        text && kind && self.dates.contains(item.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{blog, date, donation, event, user};

    #[test]
    fn empty_search_matches_everything() {
        let filter = UserFilter::default();
        assert!(filter.matches(&user("Ada", "ada@example.com")));
    }

    #[test]
    fn user_search_looks_at_name_and_email() {
        let ada = user("Ada Lovelace", "countess@analytical.org");
        assert!(UserFilter { search: "LOVE".into() }.matches(&ada));
        assert!(UserFilter { search: "analytical".into() }.matches(&ada));
        assert!(!UserFilter { search: "babbage".into() }.matches(&ada));
    }

    #[test]
    fn event_search_includes_location_and_pricing() {
        let yoga = event("Morning Yoga", "Riverside Park", PricingType::Paid, 25.0);
        let by_location = EventFilter {
            search: "riverside".into(),
            pricing: None,
        };
        assert!(by_location.matches(&yoga));

        let free_only = EventFilter {
            search: String::new(),
            pricing: Some(PricingType::Free),
        };
        assert!(!free_only.matches(&yoga));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange::new(Some(date("2025-03-01")), Some(date("2025-03-10")));
        assert!(range.contains(date("2025-03-01")));
        assert!(range.contains(date("2025-03-10")));
        assert!(!range.contains(date("2025-03-11")));

        let open_ended = DateRange::new(None, Some(date("2025-03-10")));
        assert!(open_ended.contains(date("1999-01-01")));
    }

    #[test]
    fn undated_blog_only_passes_without_bounds() {
        let undated = blog("Drafty", None);
        assert!(BlogFilter::default().matches(&undated));

        let bounded = BlogFilter {
            search: String::new(),
            dates: DateRange::new(Some(date("2025-01-01")), None),
        };
        assert!(!bounded.matches(&undated));
    }

    #[test]
    fn donation_filters_are_conjunctive() {
        let mut funder = donation("Robert Wilson", 1000.0, "2025-03-08");
        funder.donation_type = DonationType::Funder;

        let matching = DonationFilter {
            search: "wilson".into(),
            donation_type: Some(DonationType::Funder),
            dates: DateRange::new(Some(date("2025-03-01")), None),
        };
        assert!(matching.matches(&funder));

        let wrong_type = DonationFilter {
            donation_type: Some(DonationType::OneOff),
            ..matching.clone()
        };
        assert!(!wrong_type.matches(&funder));

        let out_of_range = DonationFilter {
            dates: DateRange::new(None, Some(date("2025-03-07"))),
            ..matching
        };
        assert!(!out_of_range.matches(&funder));
    }
}
