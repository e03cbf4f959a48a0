//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - amplitude-amplified search over bitstrings",
        style("Grover").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  grover-ir           Circuit intermediate representation");
    println!("  grover-search       Oracle, amplification and circuit assembly");
    println!("  grover-hal          Backend abstraction and sampling");
    println!("  grover-qasm3        OpenQASM 3 emitter");
    println!("  grover-adapter-sim  Statevector simulator");
    println!("  grover-cli          Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
