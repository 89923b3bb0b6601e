// src/commands/datasette.rs
// =============================================================================
// Handler for the datasette command group.
//
// Every write goes through the same steps, in this order:
// 1. Build the client (fails without a token, before anything else)
// 2. Load the payload file (fails on bad JSON, before any request)
// 3. Build the request for the action
// 4. Send it and print the response
// =============================================================================

use crate::cli::{DatasetteCommand, StoreInvocation};
use crate::error::Result;
use crate::store::{self, Payload, StoreClient, StoreInput, StoreRequest};
use tracing::info;

pub async fn run(command: DatasetteCommand) -> Result<()> {
    match command {
        DatasetteCommand::GetAuthToken { username, secret } => {
            let token =
                store::create_token(store::DEFAULT_TOKEN_PROGRAM, &username, secret.as_deref()).await?;
            println!("{}", token);
            Ok(())
        }
        command => {
            // Every other subcommand lowers into an invocation
            if let Some(invocation) = command.into_invocation() {
                let output = run_store_action(invocation).await?;
                println!("{}", output);
            }
            Ok(())
        }
    }
}

// Runs one store write and returns the rendered response
pub async fn run_store_action(invocation: StoreInvocation) -> Result<String> {
    let StoreInvocation {
        action,
        database,
        table,
        pks,
        payload_file,
        return_rows,
        confirm,
        connection,
    } = invocation;

    let client = StoreClient::new(&connection.into_config())?;
    let payload = payload_file.as_deref().map(Payload::load).transpose()?;

    let request = StoreRequest::build(
        action,
        StoreInput {
            database,
            table,
            pks,
            payload,
            return_rows,
            confirm,
        },
    )?;

    info!(action = action.name(), base_url = %client.base_url(), "store write");
    let response = client.send(&request).await?;
    response.render()
}
