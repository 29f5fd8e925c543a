use anyhow::Result;
use habitui::config::Config;
use habitui::constants::VAULT_EMPTY;
use habitui::logger;
use habitui::theme::ThemeCache;
use habitui::vault::Vault;
use log::info;

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--init-config") {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let config = Config::load()?;
    if let Some(path) = logger::setup(&config.logging)? {
        info!("Logging to {}", path.display());
    }

    let mut themes = ThemeCache::new(Config::themes_dir().ok());
    let theme = themes.get(&config.ui.theme)?;
    println!("Theme: {}", theme.name);

    let vault = Vault::from_config(&config)?;
    info!("Using vault at {}", vault.folder().display());

    let entries = vault.entries();
    if entries.is_empty() {
        println!("{}", VAULT_EMPTY);
    }
    let pattern = config.datetime_format();
    for name in entries {
        let stale = if vault.is_fresh(&name, config.cache_max_age()) { "" } else { ", stale" };
        println!("{:<16} {}{}", name, vault.fetched_at(&name).format_with_diff(&pattern), stale);
    }

    Ok(())
}
