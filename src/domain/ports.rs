use crate::domain::model::{Country, ServiceCatalog};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value settings collaborator. Values are opaque scalar strings;
/// persistence format is the adapter's business.
pub trait SettingsStore: Send + Sync {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(
        &mut self,
        key: &str,
        value: String,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn flush(&mut self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Read-only reference data: carrier service catalog and countries.
pub trait ReferenceData: Send + Sync {
    fn carrier_services(&self) -> &ServiceCatalog;
    fn countries(&self) -> &[Country];
}

/// One admin configuration surface (render the current state, save a form).
#[async_trait]
pub trait Configurator: Send + Sync {
    type Model: Send;
    type Form: Send;

    fn plugin_name(&self) -> &'static str;

    async fn render(&self) -> Result<Self::Model>;

    async fn save(&mut self, form: Self::Form) -> Result<()>;
}
