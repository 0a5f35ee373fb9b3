//! Collection listings.

use std::io::Write;

use maktaba_client::CatalogApi;
use maktaba_core::{Ad, Category, Offer, Price};

use super::{CliError, Output};

/// List products, optionally in one category.
///
/// # Errors
///
/// Returns an error if the API call or writing fails.
pub async fn products<A: CatalogApi, W: Write>(
    api: &A,
    category: Option<&str>,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let products = api.list_products(category).await?;
    tracing::debug!(count = products.len(), ?category, "Fetched products");

    if products.is_empty() {
        out.note("No products")?;
    }
    for product in &products {
        let line = format!(
            "{}\t{}\t{}\t{}",
            product.id,
            product.name,
            Price::new(product.price, out.currency()),
            product.category.as_deref().unwrap_or("—"),
        );
        out.record(product, &line)?;
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the API call or writing fails.
pub async fn categories<A: CatalogApi, W: Write>(
    api: &A,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let categories = api.list::<Category>().await?;
    if categories.is_empty() {
        out.note("No categories")?;
    }
    for category in &categories {
        out.record(category, &format!("{}\t{}", category.id, category.name))?;
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the API call or writing fails.
pub async fn ads<A: CatalogApi, W: Write>(api: &A, out: &mut Output<W>) -> Result<(), CliError> {
    let ads = api.list::<Ad>().await?;
    if ads.is_empty() {
        out.note("No ads")?;
    }
    for ad in &ads {
        out.record(ad, &format!("{}\t{}\t{}", ad.id, ad.title, ad.description))?;
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the API call or writing fails.
pub async fn offers<A: CatalogApi, W: Write>(
    api: &A,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    let offers = api.list::<Offer>().await?;
    if offers.is_empty() {
        out.note("No offers")?;
    }
    for offer in &offers {
        out.record(offer, &format!("{}\t{}\t{}", offer.id, offer.title, offer.discount))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use maktaba_client::memory::MemoryCatalog;

    use super::*;
    use crate::commands::test_support::{json, lines, text};

    #[tokio::test]
    async fn test_products_text_lines() {
        let api = MemoryCatalog::sample();
        let mut out = text();

        products(&api, None, &mut out).await.unwrap();

        let lines = lines(out);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1\tTafsir\t$25.00\tBooks");
        assert_eq!(lines[2], "3\tNotebook\t$3.00\tStationery");
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let api = MemoryCatalog::sample();
        let mut out = text();

        products(&api, Some("Stationery"), &mut out).await.unwrap();

        assert_eq!(lines(out), vec!["3\tNotebook\t$3.00\tStationery"]);
        assert_eq!(api.product_queries(), vec![Some("Stationery".to_string())]);
    }

    #[tokio::test]
    async fn test_empty_listing_prints_note_only_in_text() {
        let api = MemoryCatalog::sample();

        let mut out = text();
        products(&api, Some("Nothing here"), &mut out).await.unwrap();
        assert_eq!(lines(out), vec!["No products"]);

        let mut out = json();
        products(&api, Some("Nothing here"), &mut out).await.unwrap();
        assert!(lines(out).is_empty());
    }

    #[tokio::test]
    async fn test_json_lines_decode_back() {
        let api = MemoryCatalog::sample();
        let mut out = json();

        categories(&api, &mut out).await.unwrap();

        let decoded: Vec<Category> = lines(out)
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(decoded, api.list::<Category>().await.unwrap());
    }

    #[tokio::test]
    async fn test_ads_and_offers() {
        let api = MemoryCatalog::sample();

        let mut out = text();
        ads(&api, &mut out).await.unwrap();
        assert_eq!(lines(out), vec!["1\tBack to school\tNew stationery every week"]);

        let mut out = text();
        offers(&api, &mut out).await.unwrap();
        assert_eq!(lines(out), vec!["1\tBuy 2 get 1\t33%"]);
    }

    #[tokio::test]
    async fn test_api_failure_is_reported() {
        let api = MemoryCatalog::sample();
        api.fail_with(500, Some("Database is down"));
        let mut out = text();

        let err = categories(&api, &mut out).await.unwrap_err();

        assert!(matches!(err, CliError::Api(_)));
        assert!(err.to_string().contains("Database is down"));
        assert!(lines(out).is_empty());
    }
}
