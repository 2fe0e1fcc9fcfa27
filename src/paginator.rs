/// Splits a list in pages, newest first.
///
/// Items are expected in the order they were added, so the last item is
/// the most recent one and shows up first on page 1.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    pub number: u32,
    pub total_pages: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let item_count = items.len() as u32;
        let page_count = item_count.div_ceil(page_size).max(1);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Pages start at 1. Anything past the last page gives the last page.
    pub fn get_page(&self, page: u32) -> Page<'a, T> {
        let number = page.clamp(1, self.page_count);
        let start = ((number - 1) * self.page_size) as usize;

        let items = self.items.iter()
            .rev()
            .skip(start)
            .take(self.page_size as usize)
            .collect();

        Page {
            items,
            number,
            total_pages: self.page_count,
        }
    }
}

pub fn paginate<T>(items: &[T], page: u32, page_size: u32) -> Page<'_, T> {
    Paginator::from(items, page_size).get_page(page)
}
