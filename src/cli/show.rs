use super::ui;
use crate::core::config::AppConfig;
use anyhow::Result;

/// Mounts the widget, waits for its single fetch and prints what it shows.
pub async fn show(config: &AppConfig) -> Result<()> {
    let mut display = crate::mount_display(config)?;

    let spinner = ui::new_spinner(&format!("Fetching {} rate", display.pair()));
    display.settled().await;
    spinner.finish_and_clear();

    let view = display.render().await;
    println!("{}", ui::format_view(&view));

    display.unmount();
    Ok(())
}
