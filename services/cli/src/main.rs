//! services/cli/src/main.rs
//!
//! Terminal client for the daily quote service. Keeps a local session token
//! and a cache of today's quote so a still-valid quote renders without a
//! network round trip, then runs a one-second countdown to the next one.

mod state;
mod ui;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use state::{CachedQuote, ClientState, QuoteView};

#[derive(Parser)]
#[command(name = "daily-spark", about = "Fetch your motivational quote of the day")]
struct Args {
    /// Base URL of the daily-spark API server.
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    /// Override the local state file location.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Print the quote once and exit, without the live countdown.
    #[arg(long)]
    no_countdown: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest<'a> {
    session_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    quote: QuoteView,
    expires_at: DateTime<Utc>,
    is_new: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let state_path = match &args.state_file {
        Some(path) => path.clone(),
        None => state::default_state_path()?,
    };

    let mut client_state = ClientState::load_or_create(&state_path)?;
    client_state.clear_expired(Utc::now());

    let (quote, expires_at) = match &client_state.cached {
        // Still-valid cache: render directly, no request.
        Some(cached) => {
            println!("This is today's quote. Come back tomorrow for a new one.");
            (cached.quote.clone(), cached.expires_at)
        }
        None => {
            let response = fetch_daily_quote(&args.server, &client_state.session_id).await?;
            client_state.cached = Some(CachedQuote {
                quote: response.quote.clone(),
                expires_at: response.expires_at,
            });
            client_state.save(&state_path)?;

            if response.is_new {
                println!("Here is your quote for today!");
            } else {
                println!("This is today's quote. Come back tomorrow for a new one.");
            }
            (response.quote, response.expires_at)
        }
    };

    ui::render_quote(&quote);

    if args.no_countdown {
        println!("Next quote in: {}", ui::format_countdown(expires_at - Utc::now()));
        return Ok(());
    }
    run_countdown(expires_at).await;

    Ok(())
}

/// Calls the server's single endpoint. Failures are reported to the user and
/// never retried automatically; re-running the command is the retry.
async fn fetch_daily_quote(server: &str, session_id: &str) -> Result<QuoteResponse> {
    let url = format!("{}/daily-quote", server.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .json(&QuoteRequest { session_id })
        .send()
        .await
        .context("could not reach the quote server, try again in a moment")?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<QuoteResponse>()
            .await
            .context("could not parse the server response")
    } else {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        bail!("the quote server reported an error: {message}");
    }
}

/// Re-renders the time remaining once per second, purely from the cached
/// expiry. Local presentation only; the server decides actual validity.
async fn run_countdown(expires_at: DateTime<Utc>) {
    loop {
        let remaining = expires_at - Utc::now();
        if remaining <= chrono::Duration::zero() {
            println!("\rNext quote in: 0h 0m 0s          ");
            println!("Your next quote is ready. Run daily-spark again!");
            break;
        }
        print!("\rNext quote in: {}          ", ui::format_countdown(remaining));
        let _ = std::io::stdout().flush();
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }
}
