//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - line ordering for reversible circuit layouts",
        style("Revlay").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  revlay-ir     Circuit model, templates and instances");
    println!("  revlay-real   Circuit text reader and writer");
    println!("  revlay-order  Cost function and ordering search");
    println!("  revlay-cli    Command-line interface");
    println!();
    println!(
        "Parallel search: {}",
        if cfg!(feature = "parallel") {
            style("enabled").green()
        } else {
            style("disabled").dim()
        }
    );
    println!("License:         {}", style("Apache-2.0").dim());
}
