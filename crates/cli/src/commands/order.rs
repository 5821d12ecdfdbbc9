//! Order placement command.

use career_closet_shop::Shop;
use career_closet_shop::models::{PaymentMethod, ShippingInfo};

/// Place an order from the current cart and print the confirmation.
///
/// # Errors
///
/// Returns the precondition violation or backend rejection for display.
#[allow(clippy::print_stdout)]
pub async fn place(
    shop: &mut Shop,
    shipping: &ShippingInfo,
    method: PaymentMethod,
) -> Result<(), Box<dyn std::error::Error>> {
    let currency = shop.config().currency.clone();
    let order = shop.place_order(shipping, method).await?;

    println!("Order #{} placed.", order.id);
    println!("  placed:  {}", order.created_at.to_rfc3339());
    println!("  status:  {}", order.status);
    println!("  total:   {currency}{}", order.total_amount);
    Ok(())
}
