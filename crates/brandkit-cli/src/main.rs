//! Binary entrypoint for the `brandkit` CLI.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = brandkit_cli::run().await;
    process::exit(exit_code);
}
