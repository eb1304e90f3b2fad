use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ResultPage — Paged envelope returned by every catalog listing
// ---------------------------------------------------------------------------

/// One page of catalog results.
///
/// `data` holds exactly the requested page, never an accumulation of earlier
/// pages. Use [`has_more`](Self::has_more) / [`next_page`](Self::next_page)
/// to decide whether to issue another request; nothing pages automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub count: u32,
    pub total_count: u64,
}

impl<T> ResultPage<T> {
    /// Whether results exist beyond this page (`page * pageSize < totalCount`).
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total_count
    }

    /// Page number to request next, or `None` on the last page.
    pub fn next_page(&self) -> Option<u32> {
        if self.has_more() {
            self.page.checked_add(1)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert every item, keeping the paging metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> ResultPage<U> {
        ResultPage {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            count: self.count,
            total_count: self.total_count,
        }
    }
}
