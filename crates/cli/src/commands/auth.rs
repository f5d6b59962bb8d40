//! Session commands: `login`, `register`, `logout`, `whoami`.

use tienda_core::{Credentials, Registration};
use tienda_storefront::api::ApiClient;

use super::CommandError;

/// Log in and persist the session.
#[allow(clippy::print_stdout)]
pub async fn login(client: &ApiClient, username: String, password: String) -> Result<(), CommandError> {
    let credentials = Credentials::new(username, password);
    let response = client.login(&credentials).await?;

    if response.token.is_none() {
        println!("El servidor no devolvió un token; la sesión no se guardó");
        return Ok(());
    }

    let name = response
        .user
        .map_or(credentials.username, |user| user.username);
    println!("Sesión iniciada como {name}");
    Ok(())
}

/// Create an account. Does not log in.
#[allow(clippy::print_stdout)]
pub async fn register(
    client: &ApiClient,
    username: String,
    email: String,
    password: String,
) -> Result<(), CommandError> {
    let registration = Registration::new(username, email, password);
    client.register(&registration).await?;
    println!(
        "Cuenta {} creada. Usa `tienda login` para entrar",
        registration.username
    );
    Ok(())
}

/// Forget the stored session.
#[allow(clippy::print_stdout)]
pub fn logout(client: &ApiClient) {
    client.logout();
    println!("Sesión cerrada");
}

/// Print the logged-in user.
#[allow(clippy::print_stdout)]
pub fn whoami(client: &ApiClient) {
    match client.current_user() {
        Some(user) => println!("{} (id {})", user.username, user.id),
        None if client.is_authenticated() => println!("Sesión activa sin perfil de usuario"),
        None => println!("No has iniciado sesión"),
    }
}
