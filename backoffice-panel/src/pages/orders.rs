//! Orders: pending list, completed orders of a day, order details

use std::sync::Arc;

use backoffice_client::HttpClient;
use chrono::NaiveDate;
use shared::models::{MenuItem, Order, OrderEvent};

use super::{Page, PageData, data};
use crate::context::AppContext;

#[derive(Debug, Clone, PartialEq)]
pub struct OrdersView {
    pub orders: Arc<Vec<Order>>,
}

/// Pending orders
pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<OrdersView> {
    let orders = ctx.pending_orders().await;
    if let Some(page) = PageData::of(&[&orders]).unsettled() {
        return page;
    }
    data(&orders)
        .map(|orders| Page::Ready(OrdersView { orders }))
        .unwrap_or(Page::Loading)
}

/// One completed order with the customer's wait time
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRow {
    pub order: Order,
    pub wait_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOrdersView {
    pub date: NaiveDate,
    /// The picked date is today
    pub is_today: bool,
    pub rows: Vec<CompletedRow>,
}

/// Orders completed on `date`
pub async fn load_completed<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    date: NaiveDate,
    today: NaiveDate,
) -> Page<CompletedOrdersView> {
    let orders = ctx.completed_orders(date).await;
    if let Some(page) = PageData::of(&[&orders]).unsettled() {
        return page;
    }
    let Some(orders) = data(&orders) else {
        return Page::Loading;
    };
    let rows = orders
        .iter()
        .map(|order| CompletedRow {
            wait_minutes: order.wait_minutes(),
            order: order.clone(),
        })
        .collect();
    Page::Ready(CompletedOrdersView {
        date,
        is_today: date == today,
        rows,
    })
}

/// An order line with the menu item's name resolved
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetailsView {
    pub order: Arc<Order>,
    pub lines: Vec<OrderLine>,
    /// `None` when the backend does not serve the history
    pub events: Option<Arc<Vec<OrderEvent>>>,
}

/// Order with its lines and, where available, its status history.
///
/// The history and the menu lookup are optional: their failure degrades
/// the view instead of replacing it with an error.
pub async fn load_details<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    id: &str,
) -> Page<OrderDetailsView> {
    let (order, items, events) =
        tokio::join!(ctx.order(id), ctx.menu_items(), ctx.order_events(id));
    if let Some(page) = PageData::of(&[&order]).unsettled() {
        return page;
    }
    let Some(order) = data(&order) else {
        return Page::Loading;
    };
    if let Some(e) = events.error() {
        tracing::debug!(order = id, "Order history unavailable: {}", e);
    }

    let items = data(&items);
    let lines = order
        .items
        .iter()
        .map(|line| OrderLine {
            menu_item_id: line.menu_item_id,
            name: item_name(items.as_deref().map(Vec::as_slice), line.menu_item_id),
            quantity: line.quantity,
        })
        .collect();

    Page::Ready(OrderDetailsView {
        order,
        lines,
        events: data(&events),
    })
}

fn item_name(items: Option<&[MenuItem]>, id: i64) -> String {
    items
        .and_then(|items| items.iter().find(|i| i.id == id))
        .map(|i| i.name_pl.clone())
        .unwrap_or_else(|| format!("ID pozycji: {}", id))
}
