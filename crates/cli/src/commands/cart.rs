//! Cart commands.
//!
//! Mutations are optimistic: the local cart updates even when the backend
//! write fails, and the sticky error is printed after the fact.

use career_closet_core::ProductId;
use career_closet_shop::Shop;

/// Show the cart joined against the catalog, with totals.
#[allow(clippy::print_stdout)]
pub fn show(shop: &Shop) {
    if shop.cart().items().is_empty() {
        println!("Your cart is empty.");
        return;
    }

    let currency = &shop.config().currency;
    for line in shop.cart().lines() {
        let name = shop
            .catalog()
            .get(&line.product_id)
            .map_or("(not in catalog)", |p| p.name.as_str());
        println!(
            "{:<24}  size {:<4}  x{:<4}  {name}",
            line.product_id, line.size, line.quantity
        );
    }
    println!("-- {} item(s)", shop.cart().count());
    println!("-- subtotal {currency}{}", shop.cart_amount());
    println!(
        "-- total with delivery {currency}{}",
        shop.checkout_total()
    );

    if let Some(error) = shop.cart().error() {
        println!("{error}");
    }
}

/// Add one unit of `(product, size)`.
#[allow(clippy::print_stdout)]
pub async fn add(shop: &mut Shop, id: &str, size: &str) {
    let id = ProductId::new(id);
    shop.add_to_cart(&id, size).await;
    report(shop, &id, size);
}

/// Set `(product, size)` to an exact quantity; 0 removes the line.
#[allow(clippy::print_stdout)]
pub async fn set(shop: &mut Shop, id: &str, size: &str, quantity: u32) {
    let id = ProductId::new(id);
    shop.update_quantity(&id, size, quantity).await;
    report(shop, &id, size);
}

#[allow(clippy::print_stdout)]
fn report(shop: &Shop, id: &ProductId, size: &str) {
    let quantity = shop.cart().items().quantity(id, size);
    if quantity == 0 {
        println!("{id} ({size}) removed from cart.");
    } else {
        println!("{id} ({size}) x{quantity} in cart.");
    }
    if let Some(error) = shop.cart().error() {
        println!("{error}");
    }
}
