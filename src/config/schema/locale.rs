use super::Config;

/// Locales with a translation file under `locales/`.
pub const SUPPORTED_LOCALES: [&str; 3] = ["en", "hi", "mr"];

fn detect_system_locale() -> Option<String> {
    std::env::var("LANG")
        .or_else(|_| std::env::var("LC_MESSAGES"))
        .ok()
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
}

/// Detect locale: `AGEMORPH_LANG` env -> config value -> system `LANG` -> `"en"`.
/// Anything without a translation file resolves to `"en"`.
fn detect_locale(config_locale: &str) -> String {
    let candidate = std::env::var("AGEMORPH_LANG")
        .ok()
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
        .or_else(|| {
            (config_locale != "en" && !config_locale.is_empty()).then(|| config_locale.to_string())
        })
        .or_else(detect_system_locale)
        .map(|raw| normalise_locale(&raw));

    match candidate {
        Some(locale) if SUPPORTED_LOCALES.contains(&locale.as_str()) => locale,
        _ => "en".into(),
    }
}

/// Normalise `"hi_IN.UTF-8"` -> `"hi"`, `"en_US"` -> `"en"`, passthrough `"mr"`.
fn normalise_locale(raw: &str) -> String {
    let base = raw.split('.').next().unwrap_or(raw);
    let lang = base.split(['_', '-']).next().unwrap_or(base);
    lang.to_string()
}

impl Config {
    /// Resolve the display locale and hand it to `rust_i18n`.
    pub fn apply_locale(&self) -> String {
        let locale = detect_locale(&self.locale);
        rust_i18n::set_locale(&locale);
        locale
    }
}
