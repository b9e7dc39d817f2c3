use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub presets_path: String,
    pub default_preset: String,
    pub admin_role: String,
    pub command_prefix: String,
    pub openai_api_hostname: String,
    pub openai_api_key: String,
    pub completion_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let presets_path =
            env::var("BLATHER_PRESETS_PATH").unwrap_or_else(|_| "./presets".to_string());
        let default_preset =
            env::var("BLATHER_DEFAULT_PRESET").unwrap_or_else(|_| "preset1".to_string());
        let admin_role = env::var("BLATHER_ADMIN_ROLE").unwrap_or_else(|_| "ad".to_string());
        let command_prefix =
            env::var("BLATHER_COMMAND_PREFIX").unwrap_or_else(|_| "./".to_string());
        let openai_api_hostname =
            env::var("BLATHER_LLM_HOST").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_api_key =
            env::var("OPENAI_API_KEY").unwrap_or_else(|_| "thiswontworkforopenai".to_string());
        let completion_timeout = env::var("BLATHER_COMPLETION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        Self {
            presets_path,
            default_preset,
            admin_role,
            command_prefix,
            openai_api_hostname,
            openai_api_key,
            completion_timeout,
        }
    }
}
