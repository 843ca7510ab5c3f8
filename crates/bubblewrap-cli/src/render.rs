//! Plain-text report rendering.

use std::fmt::{self, Write};
use std::path::Path;

use bubblewrap_core::{RecommendedSet, Report};

fn relative<'a>(root: &Path, path: &'a Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

pub fn render_text(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut impl Write, report: &Report) -> fmt::Result {
    let root = report.root.as_path();

    writeln!(
        out,
        "bubblewrap: {} ({} trials per test, {} tests run in {} ms)",
        root.display(),
        report.trials,
        report.executed_tests,
        report.duration_ms
    )?;

    match report.max_flake_rate {
        Some(rate) => {
            writeln!(out, "\nFlakiest modules (flake rate {rate:.3}):")?;
            for name in &report.flakiest_modules {
                writeln!(out, "  {name}")?;
            }
        }
        None => writeln!(out, "\nNo covered modules found.")?,
    }

    if !report.slowest_modules.is_empty() {
        writeln!(out, "\nSlowest modules:")?;
        for module in &report.slowest_modules {
            writeln!(out, "  {:<32} {:>10.3}s", module.name, module.runtime)?;
        }
    }

    let rec = &report.recommendation;
    let which = match rec.choice {
        RecommendedSet::Selected => "largest subset within half the runtime",
        RecommendedSet::Complement => "complement of the largest subset within half the runtime",
    };
    writeln!(
        out,
        "\nRecommended tests ({} of {}, {which}):",
        rec.recommended.len(),
        rec.selected.len() + rec.complement.len()
    )?;
    for path in &rec.recommended {
        writeln!(out, "  {}", relative(root, path))?;
    }

    if !report.uncovered_modules.is_empty() {
        writeln!(
            out,
            "\nModules without tests: {}",
            report.uncovered_modules.join(", ")
        )?;
    }

    let failed: Vec<_> = report.failed_to_run().collect();
    if !failed.is_empty() {
        writeln!(out, "\nTests that could not run:")?;
        for test in failed {
            writeln!(
                out,
                "  {}: {}",
                relative(root, &test.path),
                test.error.as_deref().unwrap_or("unknown error")
            )?;
        }
    }

    Ok(())
}
