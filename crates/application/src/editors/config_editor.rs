//! Configuration form model

use std::sync::Arc;

use domain::{DataSourceSettings, DomainError, SecureJsonData, WeatherUnits};

use super::OptionsHost;

/// Edits data source settings and emits them to the host
pub struct ConfigEditor {
    options: DataSourceSettings,
    url_error: Option<String>,
    host: Arc<dyn OptionsHost>,
}

impl std::fmt::Debug for ConfigEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigEditor")
            .field("options", &self.options)
            .field("url_error", &self.url_error)
            .finish_non_exhaustive()
    }
}

impl ConfigEditor {
    /// Open the form on existing options
    pub fn new(options: DataSourceSettings, host: Arc<dyn OptionsHost>) -> Self {
        Self {
            options,
            url_error: None,
            host,
        }
    }

    /// Current options
    #[must_use]
    pub const fn options(&self) -> &DataSourceSettings {
        &self.options
    }

    /// Inline error for the URL field
    #[must_use]
    pub fn url_error(&self) -> Option<&str> {
        self.url_error.as_deref()
    }

    /// Placeholder of the API key input
    #[must_use]
    pub const fn api_key_placeholder(&self) -> &'static str {
        if self.options.api_key_configured() {
            "Configured"
        } else {
            "Enter API Key"
        }
    }

    /// Whether the reset button is offered
    #[must_use]
    pub const fn show_reset(&self) -> bool {
        self.options.api_key_configured()
    }

    /// Value shown in the API key input
    #[must_use]
    pub fn api_key_value(&self) -> &str {
        self.options
            .secure_json_data
            .api_key
            .as_deref()
            .unwrap_or_default()
    }

    /// Value shown in the URL input
    #[must_use]
    pub fn url_value(&self) -> &str {
        self.options.json_data.url.as_deref().unwrap_or_default()
    }

    /// Replace the pending secrets with a new API key
    pub fn on_api_key_change(&mut self, value: &str) {
        self.options.secure_json_data = SecureJsonData {
            api_key: Some(value.to_string()),
        };
        self.emit();
    }

    /// Forget the stored API key
    pub fn on_reset_api_key(&mut self) {
        self.options.secure_json_fields.api_key = false;
        self.options.secure_json_data.api_key = Some(String::new());
        self.emit();
    }

    /// Store the endpoint and validate its syntax
    ///
    /// The value is stored even when it does not parse; the error is shown
    /// next to the field.
    pub fn on_url_change(&mut self, value: &str) {
        self.url_error = validate_url(value).err().map(|e| e.to_string());
        self.options.json_data.url = Some(value.to_string());
        self.emit();
    }

    /// Store the default measurement system
    pub fn on_units_change(&mut self, units: WeatherUnits) {
        self.options.json_data.units = Some(units);
        self.emit();
    }

    fn emit(&self) {
        self.host.on_options_change(self.options.clone());
    }
}

/// Syntactic URL check; an empty value is accepted
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` when the value is not an absolute URL.
pub fn validate_url(value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Ok(());
    }
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| DomainError::InvalidUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::MockOptionsHost;
    use parking_lot::Mutex;
    use proptest::prelude::*;

    /// Host that keeps the last options and marks them saved, like a host
    /// persisting the form
    #[derive(Default)]
    struct SavingHost {
        saved: Mutex<Option<DataSourceSettings>>,
    }

    impl OptionsHost for SavingHost {
        fn on_options_change(&self, mut options: DataSourceSettings) {
            options.mark_saved();
            *self.saved.lock() = Some(options);
        }
    }

    fn quiet_host() -> Arc<dyn OptionsHost> {
        let mut host = MockOptionsHost::new();
        host.expect_on_options_change().return_const(());
        Arc::new(host)
    }

    #[test]
    fn api_key_change_replaces_secure_data() {
        let mut host = MockOptionsHost::new();
        host.expect_on_options_change()
            .withf(|o| o.secure_json_data.api_key.as_deref() == Some("abc"))
            .times(1)
            .return_const(());

        let mut editor = ConfigEditor::new(DataSourceSettings::default(), Arc::new(host));
        editor.on_api_key_change("abc");
        assert_eq!(editor.api_key_value(), "abc");
    }

    #[test]
    fn reset_clears_secret_and_flag() {
        let mut options = DataSourceSettings::new("https://api.example.com");
        options.secure_json_fields.api_key = true;

        let mut host = MockOptionsHost::new();
        host.expect_on_options_change()
            .withf(|o| {
                !o.secure_json_fields.api_key
                    && o.secure_json_data.api_key.as_deref() == Some("")
                    && o.json_data.url.as_deref() == Some("https://api.example.com")
            })
            .times(1)
            .return_const(());

        let mut editor = ConfigEditor::new(options, Arc::new(host));
        assert!(editor.show_reset());
        assert_eq!(editor.api_key_placeholder(), "Configured");

        editor.on_reset_api_key();
        assert!(!editor.show_reset());
        assert_eq!(editor.api_key_placeholder(), "Enter API Key");
    }

    #[test]
    fn save_then_reset_round_trip() {
        let host = Arc::new(SavingHost::default());
        let mut editor = ConfigEditor::new(
            DataSourceSettings::new("https://api.example.com"),
            Arc::clone(&host) as Arc<dyn OptionsHost>,
        );

        editor.on_api_key_change("secret");
        let saved = host.saved.lock().clone().unwrap();
        assert!(saved.api_key_configured());

        let mut editor = ConfigEditor::new(saved, Arc::clone(&host) as Arc<dyn OptionsHost>);
        editor.on_reset_api_key();
        let saved = host.saved.lock().clone().unwrap();
        assert!(!saved.api_key_configured());
        assert_eq!(saved.secure_json_data.api_key.as_deref(), Some(""));
    }

    #[test]
    fn url_change_stores_value_and_clears_error() {
        let mut editor = ConfigEditor::new(DataSourceSettings::default(), quiet_host());

        editor.on_url_change("not a url");
        assert_eq!(editor.url_value(), "not a url");
        assert!(editor.url_error().unwrap().starts_with("Invalid URL"));

        editor.on_url_change("https://api.openweathermap.org/data/2.5/forecast");
        assert!(editor.url_error().is_none());
    }

    #[test]
    fn empty_url_is_not_an_error() {
        let mut editor = ConfigEditor::new(DataSourceSettings::default(), quiet_host());
        editor.on_url_change("");
        assert!(editor.url_error().is_none());
    }

    #[test]
    fn units_change_is_emitted() {
        let mut host = MockOptionsHost::new();
        host.expect_on_options_change()
            .withf(|o| o.json_data.units == Some(WeatherUnits::Imperial))
            .times(1)
            .return_const(());

        let mut editor = ConfigEditor::new(DataSourceSettings::default(), Arc::new(host));
        editor.on_units_change(WeatherUnits::Imperial);
        assert_eq!(editor.options().units(), WeatherUnits::Imperial);
    }

    proptest! {
        #[test]
        fn any_saved_key_is_cleared_by_reset(
            key in "[A-Za-z0-9]{1,40}",
            url in "https://[a-z]{1,10}\\.com/[a-z]{0,10}",
        ) {
            let host = Arc::new(SavingHost::default());
            let mut editor = ConfigEditor::new(
                DataSourceSettings::new(url),
                Arc::clone(&host) as Arc<dyn OptionsHost>,
            );
            editor.on_api_key_change(&key);
            let saved = host.saved.lock().clone().unwrap();
            prop_assert!(saved.api_key_configured());

            let mut editor = ConfigEditor::new(saved, Arc::clone(&host) as Arc<dyn OptionsHost>);
            editor.on_reset_api_key();
            let saved = host.saved.lock().clone().unwrap();
            prop_assert!(!saved.api_key_configured());
            prop_assert_eq!(saved.secure_json_data.api_key.as_deref(), Some(""));
        }
    }
}
