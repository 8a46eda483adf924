//! `server` and `token` - proxy lifecycle control and token issuance.

use anyhow::Result;

use super::{expect_data, expect_ok, Context};
use crate::cli::ServerAction;

pub async fn run(ctx: &Context, action: ServerAction) -> Result<()> {
    match action {
        ServerAction::Start { port } => {
            let port = port.unwrap_or(ctx.settings.server_port);
            let message = expect_ok(ctx.client.start_server(port).await, "start server")?;
            println!("{}", message.unwrap_or_else(|| format!("Server started on port {port}")));
            Ok(())
        }
        ServerAction::Stop => {
            let message = expect_ok(ctx.client.stop_server().await, "stop server")?;
            println!("{}", message.unwrap_or_else(|| "Server stopped".to_string()));
            Ok(())
        }
        ServerAction::Restart { port } => {
            let port = port.unwrap_or(ctx.settings.server_port);
            let message = expect_ok(ctx.client.restart_server(port).await, "restart server")?;
            println!("{}", message.unwrap_or_else(|| format!("Server restarted on port {port}")));
            Ok(())
        }
    }
}

pub async fn token(ctx: &Context, client_id: &str) -> Result<()> {
    let grant = expect_data(ctx.client.generate_token(client_id).await, "generate token")?;
    println!("{}", grant.token);
    Ok(())
}
