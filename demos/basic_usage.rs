//! Basic usage example for the factorial-design library.
//!
//! Generates a half-factorial design, names the factors and levels,
//! randomizes the run order and writes the CSV export.
//!
//! Run with `RUST_LOG=debug` to see the library's tracing output.

use factorial_design::export::EXPORT_FILE_NAME;
use factorial_design::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Factorial Design - Basic Usage Example\n");

    let config = DesignConfig::new(3, vec![1, 2], true);
    println!("Generating {config}...");

    let mut session = DesignSession::new();
    session.regenerate(&config)?;
    println!("Design matrix ({} runs):", session.matrix().runs());
    println!("{}", session.matrix());

    session.set_header(0, "Temperature")?;
    session.set_header(1, "Pressure")?;
    session.set_header(2, "Interaction")?;
    session.set_label(0, 1, "150C")?;
    session.set_label(0, 2, "180C")?;
    session.set_label(1, 1, "1 bar")?;
    session.set_label(1, 2, "2 bar")?;

    // Level 3 is not part of this design.
    if let Err(err) = session.set_label(0, 3, "210C") {
        println!("Rejected edit: {err}\n");
    }

    let mut rng = rand::thread_rng();
    session.shuffle(&mut rng);
    println!("Randomized run order:");
    for row in session.rows() {
        println!(
            "  {:>2}  (run {:>2})  {}",
            row.experiment,
            row.source_row + 1,
            row.cells.join(" | ")
        );
    }
    println!();

    println!("{EXPORT_FILE_NAME}:");
    println!("{}", session.to_csv()?);

    session.restore();
    println!("\nRestored order:");
    println!("{}", session.to_csv()?);

    // Rejected requests leave the session untouched.
    match session.regenerate(&DesignConfig::new(6, vec![1, 2, 3], false)) {
        Ok(()) => println!("unexpectedly accepted"),
        Err(err) => println!("\nRejected design: {err}"),
    }
    println!("Still {} runs", session.matrix().runs());

    Ok(())
}
