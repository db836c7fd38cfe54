#[cfg(test)]
mod tests {
    use crate::env_vars::{apply_conventional_vars_with, config_path_to_env_var};
    use crate::models::{AppConfig, RunEnvironment, DEFAULT_PORT, DEFAULT_TOKEN_URI};
    use config::{Config, File, FileFormat};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.n8n.timeout_secs, 10);
        assert_eq!(config.gcal.timeout_secs, 10);
        assert_eq!(config.gcal.token_uri, DEFAULT_TOKEN_URI);
        assert_eq!(config.environment, RunEnvironment::Development);
    }

    #[test]
    fn test_file_source_fills_missing_fields_with_defaults() {
        let toml = r#"
            environment = "production"

            [n8n]
            book_webhook_url = "http://n8n.local/webhook/book"

            [gcal]
            calendar_id = "team@example.com"
        "#;
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.environment, RunEnvironment::Production);
        assert_eq!(
            config.n8n.book_webhook_url.as_deref(),
            Some("http://n8n.local/webhook/book")
        );
        assert_eq!(config.n8n.cancel_webhook_url, None);
        assert_eq!(config.n8n.timeout_secs, 10);
        assert_eq!(config.gcal.calendar_id.as_deref(), Some("team@example.com"));
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_conventional_vars_override_config() {
        let lookup = lookup_from(&[
            ("PORT", "8081"),
            ("NODE_ENV", "production"),
            ("N8N_BOOK_WEBHOOK_URL", "http://hooks/book"),
            ("N8N_CANCEL_WEBHOOK_URL", "http://hooks/cancel"),
            ("GOOGLE_SERVICE_ACCOUNT_KEY_PATH", "/secrets/sa.json"),
            ("GOOGLE_CALENDAR_ID", "clinic@example.com"),
        ]);
        let config = apply_conventional_vars_with(AppConfig::default(), lookup);

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.environment, RunEnvironment::Production);
        assert_eq!(config.n8n.book_webhook_url.as_deref(), Some("http://hooks/book"));
        assert_eq!(config.n8n.cancel_webhook_url.as_deref(), Some("http://hooks/cancel"));
        assert_eq!(config.gcal.key_path.as_deref(), Some("/secrets/sa.json"));
        assert_eq!(config.gcal.calendar_id.as_deref(), Some("clinic@example.com"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_and_blank_values_are_ignored() {
        let mut base = AppConfig::default();
        base.n8n.book_webhook_url = Some("http://from-file/book".to_string());
        let lookup = lookup_from(&[("PORT", "not-a-port"), ("N8N_BOOK_WEBHOOK_URL", "   ")]);
        let config = apply_conventional_vars_with(base, lookup);

        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(
            config.n8n.book_webhook_url.as_deref(),
            Some("http://from-file/book")
        );
    }

    #[test]
    fn test_app_env_takes_precedence_over_node_env() {
        let lookup = lookup_from(&[("APP_ENV", "test"), ("NODE_ENV", "production")]);
        let config = apply_conventional_vars_with(AppConfig::default(), lookup);
        assert_eq!(config.environment, RunEnvironment::Test);
    }

    #[test]
    fn test_validate_reports_every_missing_webhook() {
        let err = AppConfig::default().validate().unwrap_err();
        assert_eq!(
            err.0,
            vec![
                "N8N_BOOK_WEBHOOK_URL is required".to_string(),
                "N8N_CANCEL_WEBHOOK_URL is required".to_string(),
            ]
        );
        assert!(err.to_string().starts_with("Configuration errors:\n"));
    }

    #[test]
    fn test_run_environment_parsing() {
        assert_eq!(RunEnvironment::from("Development".to_string()), RunEnvironment::Development);
        assert_eq!(RunEnvironment::from("dev".to_string()), RunEnvironment::Development);
        assert_eq!(RunEnvironment::from("test".to_string()), RunEnvironment::Test);
        assert_eq!(RunEnvironment::from("prod".to_string()), RunEnvironment::Production);
        assert_eq!(RunEnvironment::from("staging".to_string()), RunEnvironment::Production);

        assert!(RunEnvironment::Development.exposes_error_detail());
        assert!(RunEnvironment::Test.exposes_error_detail());
        assert!(!RunEnvironment::Production.exposes_error_detail());
    }

    #[test]
    fn test_config_path_to_env_var() {
        if std::env::var("PREFIX").is_ok() {
            return;
        }
        assert_eq!(
            config_path_to_env_var("n8n.book_webhook_url"),
            "BOOKWIRE__N8N__BOOK_WEBHOOK_URL"
        );
    }
}
