//! Account commands: signup, login, logout.

use secrecy::SecretString;

use career_closet_shop::Shop;

/// Register a new account. Does not log in.
///
/// # Errors
///
/// Returns the validation or backend error for display.
#[allow(clippy::print_stdout)]
pub async fn sign_up(
    shop: &Shop,
    name: &str,
    email: &str,
    password: &SecretString,
    confirm: &SecretString,
) -> Result<(), Box<dyn std::error::Error>> {
    let message = shop
        .session()
        .sign_up(name, email, password, confirm)
        .await?;
    println!("{message}");
    println!("Log in with: closet-cli login -e {email} -p <password>");
    Ok(())
}

/// Log in and persist the token for subsequent invocations.
///
/// # Errors
///
/// Returns the validation or backend error for display.
#[allow(clippy::print_stdout)]
pub async fn login(
    shop: &mut Shop,
    email: &str,
    password: &SecretString,
) -> Result<(), Box<dyn std::error::Error>> {
    shop.login(email, password).await?;

    let name = shop
        .session()
        .user()
        .map_or("there", |user| user.user_name.as_str());
    println!("Welcome back, {name}. Cart has {} item(s).", shop.cart().count());

    if let Some(error) = shop.cart().error() {
        println!("{error}");
    }
    Ok(())
}

/// Log out and clear the persisted token and cart.
#[allow(clippy::print_stdout)]
pub fn logout(shop: &mut Shop) {
    shop.logout();
    println!("Logged out.");
}
