//! Rondo driver binary.
//!
//! Runs one ring selection and prints the result. Usage:
//!
//! ```text
//! rondo [TOTAL] [REQUIRED]
//! ```
//!
//! Defaults to 12 actors with a quota of 5. A degraded run (budget
//! exhausted before the quota was met) is reported but still exits 0; only
//! an invalid configuration is a failure.

use rondo_select::SelectionRun;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rondo=info,rondo_select=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let total: usize = match args.next() {
        Some(arg) => arg.parse()?,
        None => 12,
    };
    let required: usize = match args.next() {
        Some(arg) => arg.parse()?,
        None => 5,
    };

    let mut run = SelectionRun::new(total, required)?;
    let outcome = run.run().await;

    println!("Selected actors: {:?}", run.selected_ids());
    println!("Outcome: {outcome}");
    if run.is_valid() {
        println!("Selection is valid: no two selected actors are adjacent.");
    } else {
        tracing::warn!(
            selected = run.selected_count(),
            required,
            "selection did not meet the quota"
        );
    }

    Ok(())
}
