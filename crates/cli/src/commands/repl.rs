//! Interactive question loop.
//!
//! Reads queries from stdin until `exit`, routing each one like the ask
//! command. The router (store + embedded index) is built once and reused
//! across the session; queries themselves stay stateless.

use crate::commands::{build_router, render};
use clap::Args;
use revlens_core::{AppConfig, AppResult};
use std::io::{BufRead, Write};

/// Interactive question loop
#[derive(Args, Debug)]
pub struct ReplCommand {}

impl ReplCommand {
    /// Execute the repl command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing repl command");

        let router = build_router(config).await?;

        println!("Ask questions about the review corpus (type 'exit' to quit)");

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("query> ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                break;
            }

            match router.route(query).await {
                Ok(answer) => render(&answer),
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        Ok(())
    }
}
