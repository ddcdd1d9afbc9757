use agemorph::config::Config;

pub fn render_status(config: &Config) -> String {
    let not_set = t!("status.not_set");
    let lines = [
        format!("◆ {}", t!("status.title")),
        String::new(),
        format!("{}     {}", t!("status.version"), env!("CARGO_PKG_VERSION")),
        format!(
            "{}      {}",
            t!("status.config"),
            config.config_path.display()
        ),
        String::new(),
        format!("  {}       {}", t!("status.model"), config.model),
        format!("  {}    {}", t!("status.endpoint"), config.api_base_url),
        format!(
            "  {}     {}",
            t!("status.api_key"),
            config.masked_api_key().unwrap_or_else(|| not_set.to_string())
        ),
        format!(
            "  {}     {}",
            t!("status.timeout"),
            config
                .request_timeout_secs
                .map_or_else(|| t!("status.no_timeout").to_string(), |s| format!("{s}s"))
        ),
        format!("  {}      {}", t!("status.locale"), config.locale),
        String::new(),
        format!(
            "  {}    {} / {} / {}",
            t!("status.defaults"),
            config.defaults.age,
            config.defaults.profession,
            if config.defaults.background.is_empty() {
                "-"
            } else {
                config.defaults.background.as_str()
            }
        ),
        format!(
            "  {}      {} -> {}",
            t!("status.export"),
            config.export.format,
            config
                .export
                .output_dir
                .as_ref()
                .map_or_else(|| ".".to_string(), |d| d.display().to_string())
        ),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_masks_api_key() {
        let config = Config {
            api_key: Some("AIzaSuperSecretValue".into()),
            ..Config::default()
        };
        let rendered = render_status(&config);
        assert!(rendered.contains("****alue"));
        assert!(!rendered.contains("SuperSecret"));
        assert!(rendered.contains("gemini-2.5-flash-image-preview"));
    }
}
