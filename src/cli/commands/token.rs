use anyhow::Context;
use chrono::{TimeZone, Utc};
use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(help = "User id the session belongs to (becomes the note author)")]
    pub user: String,

    #[arg(long, help = "Delegated Google Drive access token to carry in the session")]
    pub drive_token: Option<String>,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    let hours = args.hours.unwrap_or(security.jwt_expiry_hours);

    let claims = Claims::new(args.user.clone(), args.drive_token, hours)
        .context("cannot mint a session token")?;
    let token = generate_jwt(&claims, &security.jwt_secret)
        .context("cannot mint a session token; is JWT_SECRET set?")?;

    let expires_at = Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .map(|dt| dt.to_rfc3339());

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => output_success(
            &output_format,
            &format!("Session token for '{}'", args.user),
            Some(json!({
                "token": token,
                "user": args.user,
                "drive_access": claims.access_token.is_some(),
                "expires_at": expires_at,
            })),
        )?,
    }

    Ok(())
}
