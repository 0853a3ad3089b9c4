use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    lifecycle::{OrderStatus, StoreState},
    services::{order_service::OrderFilter, store_service::StoreFilter},
};

const DEFAULT_PER_PAGE: u64 = 20;
const MAX_PER_PAGE: u64 = 100;
const MAX_PAGE: u64 = 1_000_000;

/// A normalized page request. Both values are clamped, so `offset` cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub per_page: u64,
}

impl PageWindow {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub state: Option<StoreState>,
    pub q: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl StoreListQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.per_page)
    }

    pub fn filter(&self) -> StoreFilter {
        StoreFilter {
            state: self.state,
            search: self.q.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub status: Option<OrderStatus>,
    pub q: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl OrderListQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.per_page)
    }

    pub fn filter(&self) -> OrderFilter {
        OrderFilter {
            status: self.status,
            search: self.q.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_clamps_inputs() {
        let w = PageWindow::new(Some(0), Some(1000));
        assert_eq!((w.page, w.per_page, w.offset()), (1, 100, 0));

        let w = PageWindow::new(Some(3), None);
        assert_eq!((w.page, w.per_page, w.offset()), (3, 20, 40));
    }

    #[test]
    fn huge_page_numbers_are_clamped() {
        let w = PageWindow::new(Some(u64::MAX), Some(u64::MAX));
        assert_eq!(w.page, MAX_PAGE);
        assert_eq!(w.per_page, MAX_PER_PAGE);
        assert_eq!(w.offset(), (MAX_PAGE - 1) * MAX_PER_PAGE);
        assert!(w.offset() < i64::MAX as u64);
    }
}
