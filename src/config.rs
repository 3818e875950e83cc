//! Environment-driven application settings.
//!
//! Every knob has a default so the server comes up with nothing configured:
//! `API_PORT` (5000), `AWS_PROFILE` ("default"), `AWS_REGION` ("eu-west-1").

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_port: u16,
    pub aws_profile: String,
    pub aws_region: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let api_port = get("API_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        let aws_profile = get("AWS_PROFILE").unwrap_or_else(|| "default".to_string());
        let aws_region = get("AWS_REGION").unwrap_or_else(|| "eu-west-1".to_string());

        Self {
            api_port,
            aws_profile,
            aws_region,
        }
    }
}
