//! Models command handler.

use std::fmt::Write as _;

use resonate_audio::CATALOG;

/// Render the built-in catalog as a plain-text table.
pub fn render() -> String {
    let width = CATALOG.iter().map(|e| e.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in CATALOG {
        let _ = writeln!(
            out,
            "{:<width$}  {:<16}  {}",
            entry.id,
            entry.labels.join(","),
            entry.description,
        );
    }
    out
}

/// Execute the models command.
pub fn execute() {
    print!("{}", render());
}
