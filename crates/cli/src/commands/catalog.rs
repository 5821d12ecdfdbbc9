//! Catalog browsing commands.

use career_closet_core::ProductId;
use career_closet_shop::Shop;
use career_closet_shop::stores::{CatalogQuery, SortOrder};

/// List products for the given filters, one page at a time.
#[allow(clippy::print_stdout)]
pub fn list(
    shop: &Shop,
    search: Option<String>,
    categories: &[String],
    sub_categories: &[String],
    sort: SortOrder,
    page: usize,
) {
    let mut query = CatalogQuery::new();
    query.set_search(search);
    for category in categories {
        query.toggle_category(category);
    }
    for sub_category in sub_categories {
        query.toggle_sub_category(sub_category);
    }
    query.set_sort(sort);
    query.go_to_page(page);

    let page = query.apply(shop.catalog().products());
    let currency = &shop.config().currency;

    if page.items.is_empty() {
        println!("No products match your filters.");
        return;
    }

    for product in &page.items {
        println!(
            "{:<24}  {currency}{:<10}  {:<14}  {:<12}  {}",
            product.id, product.price, product.category, product.sub_category, product.name
        );
    }
    println!(
        "-- page {}/{} ({} products)",
        page.page, page.total_pages, page.total_items
    );
}

/// Show one product, using the deep-link fallback fetch on a cache miss.
///
/// # Errors
///
/// Returns an error if the product is not in the cache and the direct
/// fetch fails.
#[allow(clippy::print_stdout)]
pub async fn show(shop: &Shop, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let id = ProductId::new(id);
    let product = shop.catalog().get_or_fetch(&id).await?;
    let currency = &shop.config().currency;

    println!("{}", product.name);
    println!("  id:       {}", product.id);
    println!("  price:    {currency}{}", product.price);
    println!("  category: {} / {}", product.category, product.sub_category);
    println!("  sizes:    {}", product.sizes.join(", "));
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    for image in &product.images {
        println!("  image:    {image}");
    }
    Ok(())
}
