//! `lessonaid status` — Show resolved configuration.

use lessonaid_config::AppConfig;
use lessonaid_service::{get_default_endpoint, validate_endpoint};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let endpoint = get_default_endpoint(&config);

    println!("LessonAid Status");
    println!("================");
    println!("  Config dir:    {}", AppConfig::config_dir().display());
    println!("  Endpoint:      {endpoint}");
    println!(
        "  Endpoint ok:   {}",
        if validate_endpoint(&endpoint) { "yes" } else { "NO (asks will fail)" }
    );
    println!("  Timeout:       {}s", config.request_timeout_secs);
    println!("  Diagnostics:   {}", if config.diagnostics { "on" } else { "off" });
    println!("  Button text:   {}", config.widget.button_text);
    println!("  Message:       {}", config.widget.request_message);
    println!(
        "  Gateway:       {}:{} ({})",
        config.gateway.host, config.gateway.port, config.gateway.orchestrator
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file, using defaults ({})", config_path.display());
    }

    Ok(())
}
