//! In-memory search and pagination for master lists and report tables.

/// Default number of rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Rows that can be matched by the free-text search box.
pub trait Searchable {
    /// Values of the fields the search box looks at.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any search field. Empty query matches all.
    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    rows.iter().filter(|row| row.matches(query)).collect()
}

/// One page of a filtered list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown (clamped into range).
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Number of pages needed for `total` items; an empty list still has one page.
pub fn page_count(total: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    total.div_ceil(per_page).max(1)
}

/// Slices `items` to the 1-based `page`, clamping out-of-range pages.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = page_count(items.len(), per_page);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_items: items.len(),
    }
}

/// 1-based index of the first row on `page`, for "Showing x-y of n" labels.
pub fn first_row_number(page: usize, per_page: usize) -> usize {
    (page.max(1) - 1) * per_page.max(1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        code: String,
        name: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.code.as_str(), self.name.as_str()]
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                code: format!("C{:03}", i),
                name: format!("Company {}", i),
            })
            .collect()
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let data = vec![
            Row { code: "KG".into(), name: "Kilogram".into() },
            Row { code: "BX".into(), name: "Box".into() },
        ];
        assert_eq!(filter_rows(&data, "kilo").len(), 1);
        assert_eq!(filter_rows(&data, "bx")[0].name, "Box");
        assert_eq!(filter_rows(&data, "  ").len(), 2);
        assert!(filter_rows(&data, "pallet").is_empty());
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let data = rows(25);
        let per_page = 10;
        let pages = page_count(data.len(), per_page);
        assert_eq!(pages, 3);

        let last = paginate(&data, pages, per_page);
        assert_eq!(last.items.len(), data.len() - (pages - 1) * per_page);
        assert_eq!(last.items[0].code, "C021");
        assert_eq!(last.total_items, 25);
    }

    #[test]
    fn exact_multiple_fills_every_page() {
        let data = rows(20);
        assert_eq!(page_count(data.len(), 10), 2);
        assert_eq!(paginate(&data, 2, 10).items.len(), 10);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let data = rows(5);
        assert_eq!(paginate(&data, 0, 10).page, 1);
        let p = paginate(&data, 9, 2);
        assert_eq!(p.page, 3);
        assert_eq!(p.items.len(), 1);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let data: Vec<Row> = Vec::new();
        let p = paginate(&data, 1, 10);
        assert_eq!(p.total_pages, 1);
        assert!(p.items.is_empty());
        assert_eq!(first_row_number(3, 10), 21);
    }
}
