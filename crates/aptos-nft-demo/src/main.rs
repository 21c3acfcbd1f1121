// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use aptos_nft_demo::{flow, Args};
use aptos_sdk::types::LocalAccount;
use clap::Parser;
use rand::rngs::OsRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let mut user1 = LocalAccount::generate(&mut OsRng);
    let mut user2 = LocalAccount::generate(&mut OsRng);

    let report = flow::run_demo(&args, &mut user1, &mut user2, &mut std::io::stdout()).await?;
    info!(
        user1 = %report.user1,
        user2 = %report.user2,
        direct_transfer_txn = %report.direct_transfer_txn,
        "Demo finished"
    );
    Ok(())
}

/// Logs go to stderr so they never interleave with the narration on stdout.
fn init_logger(verbose: bool) {
    let default_directive = if verbose {
        "warn,aptos_nft_demo=debug,aptos_sdk=debug,aptos_rest_client=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
