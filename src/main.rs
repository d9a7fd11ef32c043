use anyhow::Context;
use vacuum_cavity::{app, config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_config = config::AppConfig::load_or_default(config::CONFIG_FILE)
        .with_context(|| format!("reading {}", config::CONFIG_FILE))?;
    app::run(app_config).context("simulation session failed")?;
    Ok(())
}
