use crate::{error::SettingsError, handler::FailureReporting};
use config::{Config, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "MESSAGE_WRITER";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Overrides the region found by the AWS default provider chain.
    #[serde(default)]
    pub region: Option<String>,
    /// Points the DynamoDB client at a local or mock endpoint.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Return failed message ids to SQS instead of acknowledging the whole batch.
    #[serde(default)]
    pub report_batch_item_failures: bool,
    #[serde(default = "default_log")]
    pub log: String,
}

pub fn default_table_name() -> String {
    "SQSmessages".to_string()
}

pub fn default_log() -> String {
    "message_writer=info".to_string()
}

impl Settings {
    /// Reads `MESSAGE_WRITER__*` variables from the process environment.
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_environment(environment())
    }

    fn from_environment(environment: Environment) -> Result<Self, SettingsError> {
        let mut settings: Settings = Config::builder()
            .add_source(environment)
            .build()
            .and_then(|config| config.try_deserialize())?;

        if settings.table_name.trim().is_empty() {
            return Err(SettingsError::EmptyTableName);
        }
        // A blank override would shadow the AWS default region and endpoint.
        settings.region = settings.region.filter(|region| !region.trim().is_empty());
        settings.endpoint_url = settings.endpoint_url.filter(|url| !url.trim().is_empty());
        Ok(settings)
    }

    pub fn failure_reporting(&self) -> FailureReporting {
        if self.report_batch_item_failures {
            FailureReporting::ReportBatchItemFailures
        } else {
            FailureReporting::Swallow
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
}

#[cfg(test)]
mod test {
    use super::{environment, Settings};
    use crate::{error::SettingsError, handler::FailureReporting};

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_environment(environment().source(Some(source)))
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.table_name, "SQSmessages");
        assert_eq!(settings.region, None);
        assert_eq!(settings.endpoint_url, None);
        assert_eq!(settings.log, "message_writer=info");
        assert_eq!(settings.failure_reporting(), FailureReporting::Swallow);
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let settings = settings_from(&[
            ("MESSAGE_WRITER__TABLE_NAME", "messages-dev"),
            ("MESSAGE_WRITER__REGION", "eu-west-2"),
            ("MESSAGE_WRITER__ENDPOINT_URL", "http://localhost:8000"),
            ("MESSAGE_WRITER__REPORT_BATCH_ITEM_FAILURES", "true"),
            ("MESSAGE_WRITER__LOG", "message_writer=debug"),
        ])
        .unwrap();

        assert_eq!(settings.table_name, "messages-dev");
        assert_eq!(settings.region.as_deref(), Some("eu-west-2"));
        assert_eq!(
            settings.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(settings.log, "message_writer=debug");
        assert_eq!(
            settings.failure_reporting(),
            FailureReporting::ReportBatchItemFailures
        );
    }

    #[test]
    fn test_ignores_unprefixed_variables() {
        let settings = settings_from(&[("TABLE_NAME", "other")]).unwrap();

        assert_eq!(settings.table_name, "SQSmessages");
    }

    #[test]
    fn test_number_like_table_name_is_kept_verbatim() {
        for name in ["007", "1.50", "42"] {
            let settings = settings_from(&[("MESSAGE_WRITER__TABLE_NAME", name)]).unwrap();

            assert_eq!(settings.table_name, name);
        }
    }

    #[test]
    fn test_blank_region_and_endpoint_fall_back_to_defaults() {
        let settings = settings_from(&[
            ("MESSAGE_WRITER__REGION", ""),
            ("MESSAGE_WRITER__ENDPOINT_URL", "  "),
        ])
        .unwrap();

        assert_eq!(settings.region, None);
        assert_eq!(settings.endpoint_url, None);
    }

    #[test]
    fn test_empty_table_name_uses_default() {
        let settings = settings_from(&[("MESSAGE_WRITER__TABLE_NAME", "")]).unwrap();

        assert_eq!(settings.table_name, "SQSmessages");
    }

    #[test]
    fn test_error_for_empty_table_name() {
        let err = settings_from(&[("MESSAGE_WRITER__TABLE_NAME", " ")]).unwrap_err();

        assert_eq!(err.to_string(), "Table name must not be empty");
    }

    #[test]
    fn test_error_for_invalid_flag() {
        let err = settings_from(&[("MESSAGE_WRITER__REPORT_BATCH_ITEM_FAILURES", "maybe")])
            .unwrap_err();

        assert!(matches!(err, SettingsError::Load(_)));
    }
}
