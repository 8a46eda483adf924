//! `status` - proxy server status, optionally refreshed on an interval.

use anyhow::Result;
use std::time::Duration;

use tingly_core::ServerStatus;

use super::{expect_data, Context};

pub async fn run(ctx: &Context, watch: bool) -> Result<()> {
    if !watch {
        let status = expect_data(ctx.client.status().await, "status")?;
        print_status(&status);
        return Ok(());
    }

    // Overlapping ticks are not coalesced; each fetch is independent.
    let mut ticker = tokio::time::interval(Duration::from_secs(ctx.settings.status_refresh_secs));
    loop {
        ticker.tick().await;
        let response = ctx.client.status().await;
        if response.success {
            if let Some(status) = response.data {
                print_status(&status);
                println!();
            }
        } else {
            eprintln!(
                "status failed: {}",
                response.error_text().unwrap_or("unknown error")
            );
        }
    }
}

fn print_status(status: &ServerStatus) {
    println!(
        "Server: {}",
        if status.server_running {
            "running"
        } else {
            "stopped"
        }
    );
    println!("Port: {}", status.port);
    println!(
        "Providers: {} configured, {} enabled",
        status.providers_total, status.providers_enabled
    );
    println!("Requests served: {}", status.request_count);
}
