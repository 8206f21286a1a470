use async_trait::async_trait;
use diesel::result;
use serde::Deserialize;

/// 1-based page window for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub per_page: i64,
}

impl Page {
    pub const DEFAULT_PER_PAGE: i64 = 20;
    pub const MAX_PER_PAGE: i64 = 100;

    pub fn new(number: Option<i64>, per_page: Option<i64>) -> Self {
        Page {
            number: number.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Saturates instead of overflowing for absurd page numbers; such a page
    /// is simply empty.
    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.per_page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new(None, None)
    }
}

/// Raw `?page=&per_page=` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(params.page, params.per_page)
    }
}

/// List / fetch / create / update over one table. Nothing is deleted.
#[async_trait]
pub trait Repository {
    type Id: Send + 'static;
    type Item: Send;
    type NewItem: Send;
    type UpdateForm: Send;

    /// Rows of one page plus the total row count.
    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error>;
    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error>;
    /// Inserts and returns the stored row.
    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error>;
    /// `Ok(None)` when no row has the given id.
    async fn update(
        &self,
        id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error>;
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(Page::default(), Page { number: 1, per_page: 20 });
        assert_eq!(Page::new(Some(0), Some(500)), Page { number: 1, per_page: 100 });
        assert_eq!(Page::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        assert_eq!(Page::new(Some(i64::MAX), Some(100)).offset(), i64::MAX);
        assert_eq!(Page::new(Some(i64::MIN), None).offset(), 0);
    }
}
