//! `lessonaid config` — Configuration management commands.

use lessonaid_config::AppConfig;
use lessonaid_service::validate_endpoint;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   Config parsed successfully");

            let mut warnings = Vec::new();

            if !validate_endpoint(&config.default_endpoint()) {
                warnings.push("Default endpoint is not an http(s) URL; every ask will be rejected");
            }

            if config.diagnostics {
                warnings.push("Diagnostics are on; disable them for production");
            }

            if config.gateway.host == "0.0.0.0" {
                warnings.push("Development gateway bound to 0.0.0.0");
            }

            if warnings.is_empty() {
                println!("   All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   warning: {w}");
                }
            }

            println!();
            println!("   Endpoint:  {}", config.default_endpoint());
            println!("   Timeout:   {}s", config.request_timeout_secs);
        }
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}
