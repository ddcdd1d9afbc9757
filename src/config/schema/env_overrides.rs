use super::Config;

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_var("AGEMORPH_API_KEY")
            .or_else(|| non_empty_var("GEMINI_API_KEY"))
            .or_else(|| non_empty_var("API_KEY"))
        {
            self.api_key = Some(key);
        }

        if let Some(model) = non_empty_var("AGEMORPH_MODEL") {
            self.model = model;
        }

        if let Some(url) = non_empty_var("AGEMORPH_BASE_URL") {
            self.api_base_url = url;
        }

        if let Ok(timeout) = std::env::var("AGEMORPH_TIMEOUT_SECS")
            && let Ok(secs) = timeout.trim().parse::<u64>()
            && secs > 0
        {
            self.request_timeout_secs = Some(secs);
        }
    }
}
