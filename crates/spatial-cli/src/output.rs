//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use spatial_core::feature::model::Feature;
use spatial_core::validation::ItemFailure;
use spatial_core::GeometryKind;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Print a single feature.
pub fn print_feature(feature: &Feature) {
    println!(
        "{} {}",
        feature.name.cyan().bold(),
        format!("(#{})", feature.id).dimmed()
    );
    println!("{}: {}", "Kind".bold(), kind_colored(feature.kind()));
    println!("{}: {}", "WKT".bold(), feature.geometry);
}

/// Print features as a table.
pub fn print_features_table(features: &[Feature]) {
    if features.is_empty() {
        println!("{}", "No features found.".dimmed());
        return;
    }

    println!("{:<8} {:<30} {:<12} {}", "ID", "Name", "Kind", "WKT");
    println!("{}", "─".repeat(90));

    for feature in features {
        let name = truncate_visual(&feature.name, 28);
        println!(
            "{:<8} {} {} {}",
            feature.id,
            pad_right(&name, 30),
            pad_right_colored(kind_colored(feature.kind()), feature.kind().as_str(), 12),
            truncate_visual(&feature.geometry.to_string(), 60).dimmed()
        );
    }

    println!();
    println!("{} feature(s) total", features.len());
}

/// Print the rejected items of a batch.
pub fn print_failures(failures: &[ItemFailure]) {
    for failure in failures {
        println!(
            "  {} {} {}",
            format!("#{}", failure.index).yellow(),
            truncate_visual(&failure.name, 28).bold(),
            failure.reason
        );
    }
}

fn kind_colored(kind: GeometryKind) -> ColoredString {
    match kind {
        GeometryKind::Point => kind.as_str().green(),
        GeometryKind::LineString => kind.as_str().blue(),
        GeometryKind::Polygon => kind.as_str().magenta(),
    }
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Pad a colored string using the width of its plain text.
fn pad_right_colored(colored: ColoredString, plain: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(plain);
    format!("{}{}", colored, " ".repeat(width.saturating_sub(visual)))
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
