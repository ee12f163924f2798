use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Settings file error: {message}")]
    SettingsFileError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidSettingValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Payment data error: {message}")]
    PaymentDataError { message: String },
}

pub type Result<T> = std::result::Result<T, PluginError>;

impl PluginError {
    /// 給 CLI 顯示用的訊息,不把內部細節丟給使用者
    pub fn user_friendly_message(&self) -> String {
        match self {
            PluginError::IoError(_) => "Could not read or write a local file".to_string(),
            PluginError::SerializationError(_) => {
                "The submitted form data could not be parsed".to_string()
            }
            PluginError::SettingsFileError { message } => {
                format!("The settings file is not usable: {}", message)
            }
            PluginError::InvalidSettingValue { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            PluginError::PaymentDataError { message } => {
                format!("Payment data is incomplete or malformed: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PluginError::IoError(_) => "Check that the path exists and is writable",
            PluginError::SerializationError(_) => "Check the JSON form payload for typos",
            PluginError::SettingsFileError { .. } => {
                "Fix or delete the settings file, then configure the plugin again"
            }
            PluginError::InvalidSettingValue { .. } => {
                "Correct the field value and save the configuration again"
            }
            PluginError::PaymentDataError { .. } => {
                "Validate the payment form before extracting payment data"
            }
        }
    }
}
