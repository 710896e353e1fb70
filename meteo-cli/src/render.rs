//! Terminal renderers for the display state machine.

use meteo_core::{RenderedConditions, Renderer};
use serde_json::json;

/// Human-friendly output: progress and errors on stderr, the result panel on
/// stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn show_loading(&mut self) {
        eprintln!("Loading weather...");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn show_result(&mut self, rendering: &RenderedConditions) {
        println!("{}", panel(rendering));
    }
}

/// One JSON document per finished lookup on stdout; loading is silent.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn show_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        println!("{}", json!({ "error": message }));
    }

    fn show_result(&mut self, rendering: &RenderedConditions) {
        match serde_json::to_string_pretty(rendering) {
            Ok(doc) => println!("{doc}"),
            Err(err) => tracing::error!(%err, "failed to serialize result"),
        }
    }
}

pub fn panel(r: &RenderedConditions) -> String {
    let rows = [
        ("Humidity", r.humidity_text()),
        ("Wind speed", r.wind_text()),
        ("Feels like", r.feels_like_text()),
        ("Visibility", r.visibility.clone()),
    ];

    let mut out = format!(
        "{}\n{}\n\n  {}  {}\u{b0}C  {}\n",
        r.location_label,
        r.date,
        r.condition.icon.glyph(),
        r.temperature_c,
        r.condition.label,
    );

    for (name, value) in rows {
        out.push_str(&format!("\n  {name:<12} {value}"));
    }

    out
}
