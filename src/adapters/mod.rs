// Adapters layer: concrete implementations of the settings-store and
// reference-data ports.

use crate::domain::model::{CarrierService, Country, ServiceCatalog};
use crate::domain::ports::{ReferenceData, SettingsStore};
use crate::utils::error::{PluginError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// TOML-file-backed key-value settings store. Keys are flat dotted strings
/// ("shipping.url"); nested tables in a hand-edited file are flattened on
/// load so both spellings work.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
    values: toml::Table,
}

impl TomlSettingsStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            values: toml::Table::new(),
        }
    }

    /// 檔案不存在視為空的 store,第一次設定時才會建檔
    pub async fn load<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path)?;
        let content = Self::substitute_env_vars(&content)?;
        let parsed: toml::Table =
            toml::from_str(&content).map_err(|e| PluginError::SettingsFileError {
                message: format!("TOML parsing error: {}", e),
            })?;

        let mut values = toml::Table::new();
        flatten_table("", parsed, &mut values);
        Ok(Self { path, values })
    }

    /// 替換環境變數 (例如 ${ACCESS_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn flatten_table(prefix: &str, table: toml::Table, out: &mut toml::Table) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&full_key, nested, out),
            toml::Value::Array(_) => {
                // 設定值只收 scalar,陣列直接略過
                tracing::debug!("ignoring non-scalar settings value for '{}'", full_key);
            }
            scalar => {
                out.insert(full_key, scalar);
            }
        }
    }
}

fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        // set() and flatten_table() only ever store scalars
        toml::Value::Array(_) | toml::Value::Table(_) => String::new(),
    }
}

impl SettingsStore for TomlSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).map(value_to_string))
    }

    async fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values
            .insert(key.to_string(), toml::Value::String(value));
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rendered =
            toml::to_string_pretty(&self.values).map_err(|e| PluginError::SettingsFileError {
                message: format!("TOML serialization error: {}", e),
            })?;
        fs::write(&self.path, rendered)?;
        Ok(())
    }
}

/// Built-in reference data: the carrier's published domestic service table
/// and the countries offered in the shipped-from dropdown.
#[derive(Debug, Clone)]
pub struct StaticReferenceData {
    catalog: ServiceCatalog,
    countries: Vec<Country>,
}

impl StaticReferenceData {
    pub fn new() -> Self {
        let catalog = ServiceCatalog::new(vec![
            CarrierService::new("01", "UPS Next Day Air"),
            CarrierService::new("02", "UPS 2nd Day Air"),
            CarrierService::new("03", "UPS Ground"),
            CarrierService::new("07", "UPS Worldwide Express"),
            CarrierService::new("08", "UPS Worldwide Expedited"),
            CarrierService::new("11", "UPS Standard"),
            CarrierService::new("12", "UPS 3 Day Select"),
            CarrierService::new("13", "UPS Next Day Air Saver"),
            CarrierService::new("14", "UPS Next Day Air Early A.M."),
            CarrierService::new("54", "UPS Worldwide Express Plus"),
            CarrierService::new("59", "UPS 2nd Day Air A.M."),
            CarrierService::new("65", "UPS Saver"),
        ]);

        let countries = vec![
            Country {
                id: 1,
                name: "United States".to_string(),
            },
            Country {
                id: 2,
                name: "Canada".to_string(),
            },
            Country {
                id: 3,
                name: "United Kingdom".to_string(),
            },
            Country {
                id: 4,
                name: "Germany".to_string(),
            },
            Country {
                id: 5,
                name: "France".to_string(),
            },
            Country {
                id: 6,
                name: "Mexico".to_string(),
            },
        ];

        Self { catalog, countries }
    }
}

impl Default for StaticReferenceData {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceData for StaticReferenceData {
    fn carrier_services(&self) -> &ServiceCatalog {
        &self.catalog
    }

    fn countries(&self) -> &[Country] {
        &self.countries
    }
}
