//! Landing page: pending orders next to today's numbers

use std::sync::Arc;

use backoffice_client::HttpClient;
use shared::models::{Bestseller, Order, TerminalOrders};

use super::{Page, PageData, data};
use crate::context::AppContext;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub pending: Arc<Vec<Order>>,
    pub terminals: Arc<Vec<TerminalOrders>>,
    pub bestsellers: Arc<Vec<Bestseller>>,
}

pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<DashboardView> {
    let (pending, terminals, bestsellers) = tokio::join!(
        ctx.pending_orders(),
        ctx.daily_stats(),
        ctx.bestsellers()
    );
    if let Some(page) = PageData::of(&[&pending, &terminals, &bestsellers]).unsettled() {
        return page;
    }
    match (data(&pending), data(&terminals), data(&bestsellers)) {
        (Some(pending), Some(terminals), Some(bestsellers)) => Page::Ready(DashboardView {
            pending,
            terminals,
            bestsellers,
        }),
        _ => Page::Loading,
    }
}
