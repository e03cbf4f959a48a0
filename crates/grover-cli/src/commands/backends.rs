//! Backends command implementation.

use anyhow::{Context, Result};
use console::style;

use grover_hal::BackendConfig;

use super::common::backend_registry;

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    println!("{} Available backends:\n", style("Grover").cyan().bold());

    let registry = backend_registry();
    for name in registry.available_backends() {
        let backend = registry
            .create(BackendConfig::new(name.clone()))
            .with_context(|| format!("failed to create backend '{name}'"))?;
        let caps = backend.capabilities();
        let available = backend.availability().await?.is_available;

        println!(
            "  {} {} {}",
            if available {
                style("●").green()
            } else {
                style("○").red()
            },
            style(&name).bold(),
            if caps.is_simulator { "(local)" } else { "" }
        );
        println!("    Qubits: {}", caps.num_qubits);
        println!("    Max shots: {}", caps.max_shots);
        println!("    Gates: {}", caps.gate_set.gates.join(", "));
        if !caps.features.is_empty() {
            println!("    Features: {}", caps.features.join(", "));
        }
        println!();
    }

    Ok(())
}
