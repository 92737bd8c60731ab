use std::sync::Arc;

use backoffice_client::HttpClient;
use shared::models::{Bestseller, TerminalOrders};

use super::{Page, PageData, data};
use crate::context::AppContext;

/// Orders completed per terminal and today's bestsellers
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub terminals: Arc<Vec<TerminalOrders>>,
    pub bestsellers: Arc<Vec<Bestseller>>,
}

pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<StatsView> {
    let (terminals, bestsellers) = tokio::join!(ctx.daily_stats(), ctx.bestsellers());
    if let Some(page) = PageData::of(&[&terminals, &bestsellers]).unsettled() {
        return page;
    }
    match (data(&terminals), data(&bestsellers)) {
        (Some(terminals), Some(bestsellers)) => Page::Ready(StatsView {
            terminals,
            bestsellers,
        }),
        _ => Page::Loading,
    }
}
