//! `relharmony config`: Configuration management commands.

use super::Context;
use crate::output;
use relharmony_config::AppConfig;

pub async fn show(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx
        .load_config()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    if ctx.json {
        println!("{}", output::to_json(&config)?);
    } else {
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

pub async fn init(ctx: &Context, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = ctx.config_path();
    AppConfig::write_default(&path, force)?;
    output::print_one(ctx.json, path.display().to_string(), |p| {
        format!("✅ Wrote default config to {p}")
    })
}

pub async fn path(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    output::print_one(ctx.json, ctx.config_path().display().to_string(), |p| p.clone())
}
