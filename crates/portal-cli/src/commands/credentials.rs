//! Game credential commands: masked listing and time-boxed reveal.

use super::App;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use portal_api::{Credential, CredentialRow, PortalBackend};
use portal_reveal::{RevealController, RevealOutcome};
use std::io::Write;
use std::time::Duration;

/// Require a portal session and hand back the wire credential for it.
fn require_portal_credential(app: &App, format: &OutputFormat) -> Option<Credential> {
    let facade = app.facade();
    if !facade.is_portal_authenticated() {
        output::print_error(
            "Not logged in to the portal. Use 'refportal portal login' or 'refportal portal link <token>'",
            format,
        );
        return None;
    }
    Some(facade.auth_credential())
}

/// List assigned game credentials (masked).
pub async fn credentials_list(app: &App, format: &OutputFormat) -> Result<()> {
    let Some(credential) = require_portal_credential(app, format) else {
        return Ok(());
    };

    let rows = app.facade().backend().list_credentials(&credential).await?;

    match format {
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No game credentials assigned.");
                return Ok(());
            }
            output::print_heading("Game Credentials");
            for row in &rows {
                let name = row.game_name.as_deref().unwrap_or(&row.game_id);
                println!("{} ({})", name, row.game_id);
                output::print_row("Username", &row.game_user_id);
                output::print_row("Password", &row.game_password);
                output::print_row("Active", if row.is_active { "yes" } else { "no" });
                if let Some(assigned_at) = &row.assigned_at {
                    output::print_row("Assigned", assigned_at);
                }
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = rows.iter().map(row_to_json).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

fn row_to_json(row: &CredentialRow) -> serde_json::Value {
    serde_json::json!({
        "id": row.id,
        "game_id": row.game_id,
        "game_name": row.game_name,
        "game_user_id": row.game_user_id,
        "game_password": row.game_password,
        "is_active": row.is_active,
        "assigned_at": row.assigned_at,
    })
}

/// Reveal the plaintext credential pair for a game, hold it for the
/// server-granted window, then clear the display. Ctrl-C hides early.
pub async fn reveal(app: &App, game_id: &str, format: &OutputFormat) -> Result<()> {
    let Some(credential) = require_portal_credential(app, format) else {
        return Ok(());
    };
    let facade = app.facade();

    let rows = facade.backend().list_credentials(&credential).await?;
    let Some(row) = rows.into_iter().find(|r| r.game_id == game_id) else {
        output::print_error(&format!("No credential assigned for game {}", game_id), format);
        return Ok(());
    };
    if !row.is_revealable() {
        output::print_error(
            &format!("Credential for {} cannot be revealed: {}", game_id, row.game_user_id),
            format,
        );
        return Ok(());
    }

    let controller = RevealController::new(facade.backend().clone());

    let session = match controller.request(&row, &credential).await {
        Ok(RevealOutcome::Revealed(session)) => session,
        Ok(_) => return Ok(()),
        Err(e) => {
            output::print_error(&e.to_string(), format);
            return Ok(());
        }
    };

    if let OutputFormat::Json = format {
        let json = serde_json::json!({
            "game_id": session.target_id,
            "username": session.username,
            "password": session.password,
            "expires_in_seconds": session.remaining_seconds,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        controller.close();
        return Ok(());
    }

    let name = row.game_name.as_deref().unwrap_or(&row.game_id);
    output::print_heading(name);
    output::print_row("Username", &session.username);
    output::print_row("Password", &session.password);
    println!();

    // Poll the countdown; Ctrl-C hides before the window elapses.
    loop {
        let Some(remaining) = controller.remaining_seconds() else {
            break;
        };
        print!("\rHiding in {:>2}s (Ctrl-C to hide now) ", remaining);
        std::io::stdout().flush()?;

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(250)) => {}
            _ = tokio::signal::ctrl_c() => {
                controller.hide();
                break;
            }
        }
    }
    controller.close();

    print!("\r{:<40}\r", "");
    println!("Credential hidden.");

    Ok(())
}
