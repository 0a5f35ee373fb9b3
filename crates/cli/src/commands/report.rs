//! Orders and dashboard counters.

use std::io::Write;

use maktaba_client::CatalogApi;
use maktaba_core::Price;

use super::{CliError, Output};

/// List orders, newest first.
///
/// # Errors
///
/// Returns an error if the API call or writing fails.
pub async fn orders<A: CatalogApi, W: Write>(
    api: &A,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let orders = api.list_orders().await?;
    if orders.is_empty() {
        out.note("No orders")?;
    }
    for order in &orders {
        let line = format!(
            "{}\t{}\t{} items\t{}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.items_count,
            Price::new(order.total_amount, out.currency()),
        );
        out.record(order, &line)?;
    }
    Ok(())
}

/// Print the catalog counters and the per-category breakdown.
///
/// # Errors
///
/// Returns an error if the API call or writing fails.
pub async fn stats<A: CatalogApi, W: Write>(api: &A, out: &mut Output<W>) -> Result<(), CliError> {
    let stats = api.stats().await?;
    let mut text = format!(
        "products\t{}\ncategories\t{}\nads\t{}\noffers\t{}\norders\t{}",
        stats.products_count,
        stats.categories_count,
        stats.ads_count,
        stats.offers_count,
        stats.orders_count,
    );
    for (name, count) in &stats.products_per_category {
        text.push_str(&format!("\n  {name}\t{count}"));
    }
    out.record(&stats, &text)
}
