pub const USERS_PAGE_SIZE: usize = 5;
pub const DONATIONS_PAGE_SIZE: usize = 10;

/// How a filtered list is cut into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Everything on one page (products, events, blogs).
    All,
    /// 1-based page of a fixed size.
    Page { number: usize, size: usize },
}

impl Paging {
    pub fn page(number: usize, size: usize) -> Self {
        Paging::Page { number, size }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page that was asked for, which may lie past `total_pages`.
    pub number: usize,
    pub page_size: Option<usize>,
    /// Size of the filtered sequence, before slicing.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Position of the first item of this page in the filtered sequence (1-based),
    /// for "S.No" style numbering.
    pub fn first_ordinal(&self) -> usize {
        match self.page_size {
            Some(size) => (self.number - 1) * size + 1,
            None => 1,
        }
    }
}

pub fn total_pages(count: usize, size: usize) -> usize {
    count.div_ceil(size.max(1))
}

/// Slice `items` to the requested window. A page past the last one yields an
/// empty page; the page number is not clamped.
pub fn paginate<T: Clone>(items: &[T], paging: Paging) -> Page<T> {
    match paging {
        Paging::All => Page {
            items: items.to_vec(),
            number: 1,
            page_size: None,
            total_items: items.len(),
            total_pages: usize::from(!items.is_empty()),
        },
        Paging::Page { number, size } => {
            let number = number.max(1);
            let size = size.max(1);
            let start = (number - 1).saturating_mul(size);
            let window = items.iter().skip(start).take(size).cloned().collect();
            Page {
                items: window,
                number,
                page_size: Some(size),
                total_items: items.len(),
                total_pages: total_pages(items.len(), size),
            }
        }
    }
}
