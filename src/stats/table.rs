//! Sorting and pagination of the results table.
//!
//! [`TableView`] is the whole table state. It is passed in by the client on
//! every request and handed back alongside the rendered page, so the server
//! never holds per-client view state.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::db::models::Match;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Home,
    Away,
    Ht,
    Ft,
    Btts,
    Comeback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

/// Allowed table page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    TwentyFive,
    #[default]
    Fifty,
    Hundred,
    TwoHundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
        PageSize::TwoHundred,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
            PageSize::TwoHundred => 200,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|p| p.get() == value)
            .ok_or_else(|| format!("page size must be one of 25, 50, 100, 200 (got {})", value))
    }
}

impl From<PageSize> for usize {
    fn from(p: PageSize) -> usize {
        p.get()
    }
}

/// Table state: sort order plus 1-based page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub sort: SortSpec,
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for TableView {
    fn default() -> Self {
        TableView {
            sort: SortSpec::default(),
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

/// One rendered page of the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    pub rows: Vec<Match>,
    /// Page actually shown after clamping
    pub page: usize,
    pub page_size: usize,
    /// Never below 1, even for an empty result
    pub total_pages: usize,
    pub total_rows: usize,
    pub view: TableView,
}

impl TableView {
    /// Clicking a column header: toggles direction on the active key,
    /// otherwise switches to `key` ascending.
    pub fn select_sort(&mut self, key: SortKey) {
        if self.sort.key == Some(key) {
            self.sort.direction = self.sort.direction.flipped();
        } else {
            self.sort = SortSpec {
                key: Some(key),
                direction: SortDirection::Asc,
            };
        }
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn next_page(&mut self, total_rows: usize) {
        self.go_to(self.page.saturating_add(1), total_rows);
    }

    pub fn prev_page(&mut self, total_rows: usize) {
        self.go_to(self.page.saturating_sub(1), total_rows);
    }

    /// Move to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, total_rows: usize) {
        self.page = page.clamp(1, total_pages(total_rows, self.page_size));
    }

    /// Sort and slice `matches` into the visible page.
    pub fn render(&self, matches: &[Match]) -> TablePage {
        let sorted = sort_matches(matches, &self.sort);
        let mut view = *self;
        view.go_to(self.page, sorted.len());

        let size = view.page_size.get();
        let start = (view.page - 1) * size;
        let rows = sorted.into_iter().skip(start).take(size).collect();

        TablePage {
            rows,
            page: view.page,
            page_size: size,
            total_pages: total_pages(matches.len(), view.page_size),
            total_rows: matches.len(),
            view,
        }
    }
}

/// `ceil(rows / page_size)`, shown as 1 for an empty table.
pub fn total_pages(rows: usize, page_size: PageSize) -> usize {
    rows.div_ceil(page_size.get()).max(1)
}

fn compare(a: &Match, b: &Match, key: SortKey) -> Ordering {
    match key {
        SortKey::Home => a.home().cmp(b.home()),
        SortKey::Away => a.away().cmp(b.away()),
        SortKey::Ht => a.ht().cmp(b.ht()),
        SortKey::Ft => a.ft().cmp(b.ft()),
        SortKey::Btts => u8::from(a.btts()).cmp(&u8::from(b.btts())),
        SortKey::Comeback => u8::from(a.comeback()).cmp(&u8::from(b.comeback())),
    }
}

/// Stable sort by the spec's key; a `None` key keeps input order.
pub fn sort_matches(matches: &[Match], spec: &SortSpec) -> Vec<Match> {
    let mut sorted = matches.to_vec();
    if let Some(key) = spec.key {
        sorted.sort_by(|a, b| match spec.direction {
            SortDirection::Asc => compare(a, b, key),
            SortDirection::Desc => compare(b, a, key),
        });
    }
    sorted
}
