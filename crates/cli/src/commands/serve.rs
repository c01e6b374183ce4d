//! `lessonaid serve` — Start the development workflows gateway.

use lessonaid_config::AppConfig;

pub async fn run(
    port_override: Option<u16>,
    orchestrator: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    if let Some(orchestrator) = orchestrator {
        config.gateway.orchestrator = orchestrator;
        config.validate()?;
    }

    println!("LessonAid development gateway");
    println!(
        "   Listening:    http://{}:{}{}",
        config.gateway.host, config.gateway.port, config.workflows_path
    );
    println!("   Orchestrator: {}", config.gateway.orchestrator);
    println!("   CORS origin:  {}", config.gateway.allowed_origin);

    lessonaid_gateway::start(config).await?;

    Ok(())
}
