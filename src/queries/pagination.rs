use crate::error::{ContactError, ContactResult};
use crate::validation;

/// One page of results. `number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// `ceil(total / page_size)`.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// Cuts page `page` out of `items`. Asking for a page past the last one
/// (including page 1 of an empty list) is `PageOutOfRange`.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> ContactResult<Page<T>> {
    let page = validation::positive(page, "page")?;
    let page_size = validation::positive(page_size, "page size")?;

    let total_items = items.len();
    let total = total_pages(total_items, page_size);
    if page > total {
        return Err(ContactError::PageOutOfRange {
            page,
            total_pages: total,
        });
    }

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = items.into_iter().skip(start).take(end - start).collect();

    Ok(Page {
        number: page,
        total_pages: total,
        total_items,
        items,
    })
}
