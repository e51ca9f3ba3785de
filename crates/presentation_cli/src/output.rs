//! Terminal output

use std::path::Path;

use application::ConfigEditor;
use chrono::DateTime;
use domain::{DataFrame, FieldValues, MainParameter, SelectableValue};

/// Render an epoch-millisecond timestamp as UTC
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map_or_else(|| ms.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// Render a value cell; NaN means "missing"
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Column header with its unit
fn header(name: &str, unit: &str) -> String {
    if unit.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({unit})")
    }
}

/// Rows of a frame as text cells, header first
pub fn frame_rows(frame: &DataFrame) -> Vec<Vec<String>> {
    let mut rows = vec![
        frame
            .fields
            .iter()
            .map(|f| header(&f.name, &f.config.unit))
            .collect::<Vec<_>>(),
    ];

    for i in 0..frame.len() {
        rows.push(
            frame
                .fields
                .iter()
                .map(|field| match &field.values {
                    FieldValues::Time(v) => v.get(i).map_or_else(String::new, |t| format_timestamp(*t)),
                    FieldValues::Number(v) => v.get(i).map_or_else(String::new, |x| format_value(*x)),
                })
                .collect(),
        );
    }
    rows
}

pub fn print_frame(frame: &DataFrame) {
    println!("📈 {} ({} rows)", frame.name, frame.len());

    let rows = frame_rows(frame);
    let widths: Vec<usize> = (0..rows.first().map_or(0, Vec::len))
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        println!("  {}", line.join("  "));
    }
    println!();
}

pub fn print_settings(editor: &ConfigEditor, path: &Path) {
    let options = editor.options();
    println!("⚙️  Settings ({})", path.display());
    println!(
        "   URL:     {}",
        options.json_data.url.as_deref().unwrap_or("(default)")
    );
    if let Some(path) = &options.json_data.path {
        println!("   Path:    {path}");
    }
    println!("   Units:   {}", options.units());
    println!("   API key: {}", editor.api_key_placeholder());
}

pub fn print_parameters(main_parameters: &[SelectableValue], units: &[SelectableValue]) {
    println!("📋 Parameters:");
    for option in main_parameters {
        println!("   {} ({})", option.value, option.label);
        if let Ok(category) = option.value.parse::<MainParameter>() {
            for sub in category.sub_parameter_options() {
                println!("     - {:<12} {}", sub.value, sub.label);
            }
        }
    }

    println!();
    println!("📏 Units:");
    for option in units {
        println!("   {} ({})", option.value, option.label);
    }
}
