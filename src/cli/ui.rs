use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::display::RateView;

/// Defines different styles for text elements.
pub enum StyleType {
    Logo,
    Label,
    Value,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Logo => style(text).magenta(),
        StyleType::Label => style(text),
        StyleType::Value => style(text).green().bold(),
    };
    styled.to_string()
}

/// Formats the widget for the terminal; the rate value is emphasized.
pub fn format_view(view: &RateView) -> String {
    let mut out = style_text(view.logo.trim_end(), StyleType::Logo);
    if let Some(line) = &view.rate {
        out.push('\n');
        out.push_str(&style_text(&format!("{}:", line.label()), StyleType::Label));
        out.push(' ');
        out.push_str(&style_text(&line.rate.to_string(), StyleType::Value));
    }
    out
}

/// Creates a spinner shown while the widget is unloaded.
pub fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
