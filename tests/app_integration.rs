use moonrate::core::config::AppConfig;
use moonrate::display::RateState;
use std::fs;
use std::path::Path;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const API_KEY: &str = "pk_test_integration";

    pub async fn create_mock_server(crypto: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        let url_path = format!("/v3/currencies/{crypto}/price");

        Mock::given(method("GET"))
            .and(path(&url_path))
            .and(query_param("apiKey", API_KEY))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn config_yaml(base_url: &str, extra: &str) -> String {
        format!(
            r#"
        providers:
          moonpay:
            base_url: {base_url}
            api_key: "{API_KEY}"
            timeout_secs: 1
        pair:
          crypto: "eth"
          fiat: "USD"
        {extra}
    "#
        )
    }
}

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let config_path = dir.join("config.yaml");
    fs::write(&config_path, content).expect("Failed to write config file");
    config_path
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_mock_server(
        "eth",
        wiremock::ResponseTemplate::new(200).set_body_string(r#"{"price": 3123.45}"#),
    )
    .await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        &test_utils::config_yaml(&mock_server.uri(), ""),
    );

    let result = moonrate::run_command(
        moonrate::AppCommand::Show,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_survives_server_error() {
    let mock_server =
        test_utils::create_mock_server("eth", wiremock::ResponseTemplate::new(500)).await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        &test_utils::config_yaml(&mock_server.uri(), ""),
    );

    let result = moonrate::run_command(
        moonrate::AppCommand::Show,
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "A failed fetch must not fail the app: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_mounted_display_renders_fetched_rate() {
    let mock_server = test_utils::create_mock_server(
        "eth",
        wiremock::ResponseTemplate::new(200).set_body_string(r#"{"price": 3123.45}"#),
    )
    .await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        &test_utils::config_yaml(&mock_server.uri(), ""),
    );
    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");

    let mut display = moonrate::mount_display(&config).expect("Failed to mount display");
    display.settled().await;

    let rendered = display.render().await.to_string();
    info!(%rendered, "Rendered display");
    assert!(rendered.starts_with(moonrate::display::BUNDLED_LOGO.trim_end()));
    assert!(rendered.ends_with("Current exchange rate (ETH to USD): 3123.45"));
    assert_eq!(display.state().await, RateState::Loaded(3123.45));
}

#[test_log::test(tokio::test)]
async fn test_timeout_leaves_only_logo() {
    let mock_server = test_utils::create_mock_server(
        "eth",
        wiremock::ResponseTemplate::new(200)
            .set_body_string(r#"{"price": 3123.45}"#)
            .set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("logo.txt"), "MY LOGO\n").expect("Failed to write logo");
    let config_path = write_config(
        temp_dir.path(),
        &test_utils::config_yaml(&mock_server.uri(), "logo_path: \"logo.txt\""),
    );
    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");

    let mut display = moonrate::mount_display(&config).expect("Failed to mount display");
    display.settled().await;

    assert_eq!(display.render().await.to_string(), "MY LOGO");
    assert_eq!(display.state().await, RateState::Unloaded);
}

#[test_log::test(tokio::test)]
async fn test_malformed_payload_leaves_only_logo() {
    let mock_server = test_utils::create_mock_server(
        "eth",
        wiremock::ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        &test_utils::config_yaml(&mock_server.uri(), ""),
    );
    let config = AppConfig::load_from_path(&config_path).expect("Failed to load config");

    let mut display = moonrate::mount_display(&config).expect("Failed to mount display");
    display.settled().await;

    let view = display.render().await;
    assert!(view.rate.is_none());
    assert!(!view.to_string().contains("Current exchange rate"));
}
