//! Authentication commands: staff login/register, portal login, link tokens,
//! status, and logout.

use super::{prompt_line, App};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use portal_api::StaffRegisterRequest;
use portal_session::AuthError;

/// Staff login with email and password.
pub async fn login(app: &App, format: &OutputFormat) -> Result<()> {
    let facade = app.facade();

    if facade.is_staff_authenticated() {
        let snapshot = facade.snapshot();
        let who = snapshot
            .display_name
            .or(snapshot.subject)
            .unwrap_or_else(|| "unknown".to_string());
        output::print_success(&format!("Already logged in as {}", who), format);
        return Ok(());
    }

    let email = prompt_line("Email")?;
    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    println!("Logging in...");

    match facade.staff_login(&email, &password).await {
        Ok(identity) => {
            let who = identity.display_name().unwrap_or_else(|| identity.subject());
            output::print_success(&format!("Logged in as {}", who), format);
        }
        Err(AuthError::LoginRejected(message)) => {
            output::print_error(&format!("Login failed: {}", message), format);
        }
        Err(e) => {
            output::print_error(&format!("Login failed: {}", e), format);
        }
    }

    Ok(())
}

/// Register a staff account, then sign in with it.
pub async fn register(app: &App, format: &OutputFormat) -> Result<()> {
    let facade = app.facade();

    let email = prompt_line("Email")?;
    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    let username = prompt_line("Username")?;
    if username.is_empty() {
        output::print_error("Username is required", format);
        return Ok(());
    }

    let referral_code = prompt_line("Referral code (optional)")?;

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    println!("Registering...");

    let request = StaffRegisterRequest {
        email,
        password,
        username,
        referral_code: (!referral_code.is_empty()).then_some(referral_code),
    };

    match facade.staff_register(&request).await {
        Ok(identity) => {
            let who = identity.display_name().unwrap_or_else(|| identity.subject());
            output::print_success(&format!("Registered and logged in as {}", who), format);
        }
        Err(AuthError::LoginRejected(message)) => {
            output::print_error(&format!("Registration failed: {}", message), format);
        }
        Err(e) => {
            output::print_error(&format!("Registration failed: {}", e), format);
        }
    }

    Ok(())
}

/// Client portal login with username and password.
pub async fn portal_login(app: &App, format: &OutputFormat) -> Result<()> {
    let facade = app.facade();

    let username = prompt_line("Username")?;
    if username.is_empty() {
        output::print_error("Username is required", format);
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    println!("Logging in...");

    let outcome = facade.client_login(&username, &password).await;
    if outcome.success {
        let snapshot = facade.snapshot();
        let who = snapshot
            .display_name
            .or(snapshot.subject)
            .unwrap_or_else(|| username.clone());
        output::print_success(&format!("Logged in to the portal as {}", who), format);
    } else {
        let message = outcome
            .message
            .unwrap_or_else(|| "Login failed".to_string());
        output::print_error(&message, format);
    }

    Ok(())
}

/// Sign in with a magic-link token.
pub async fn portal_link(app: &App, token: &str, format: &OutputFormat) -> Result<()> {
    let facade = app.facade();

    match facade.apply_link_token(token).await {
        Ok(identity) => {
            let who = identity.display_name().unwrap_or_else(|| identity.subject());
            output::print_success(&format!("Link accepted; logged in as {}", who), format);
        }
        Err(AuthError::LoginRejected(message)) => {
            output::print_error(&message, format);
        }
        Err(e) => {
            output::print_error(&format!("Link validation failed: {}", e), format);
        }
    }

    Ok(())
}

/// Show session status.
pub async fn status(app: &App, format: &OutputFormat) -> Result<()> {
    let snapshot = app.facade().snapshot();

    // The resolved name when one exists, else the cached profile hint.
    let display_name = snapshot.display_name.clone().or_else(|| {
        app.facade()
            .cached_profile_hint()
            .and_then(|profile| profile.display_name)
    });

    match format {
        OutputFormat::Text => {
            let session = match snapshot.scheme {
                Some("staff") => "staff",
                Some("client_password") => "client (password)",
                Some("client_link") => "client (link)",
                _ => "not logged in",
            };
            output::print_row("Session", session);
            if let Some(subject) = &snapshot.subject {
                output::print_row("Subject", subject);
            }
            if let Some(name) = &display_name {
                output::print_row("Name", name);
            }
            if snapshot.staff_authenticated {
                output::print_row("Admin", if snapshot.is_admin { "yes" } else { "no" });
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "staff_authenticated": snapshot.staff_authenticated,
                "portal_authenticated": snapshot.portal_authenticated,
                "is_admin": snapshot.is_admin,
                "scheme": snapshot.scheme,
                "subject": snapshot.subject,
                "display_name": display_name,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Log out and clear all stored credentials.
pub async fn logout(app: &App, format: &OutputFormat) -> Result<()> {
    app.facade().logout();
    output::print_success("Logged out", format);
    Ok(())
}
