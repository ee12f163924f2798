pub mod configure;
pub mod payment;
pub mod selection;

pub use crate::domain::model::{
    CarrierService, Country, FormData, PaymentForm, PaymentInfo, ServiceCatalog,
};
pub use crate::domain::ports::{Configurator, ReferenceData, SettingsStore};
pub use crate::utils::error::Result;
