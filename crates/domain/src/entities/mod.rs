//! Entities - settings, queries, forecast records and frames

mod frame;
mod query;
mod settings;
mod weather_record;

pub use frame::{DataFrame, Field, FieldConfig, FieldType, FieldValues};
pub use query::WeatherQuery;
pub use settings::{DataSourceJsonData, DataSourceSettings, SecureJsonData, SecureJsonFields};
pub use weather_record::{
    CloudsSection, ForecastPayload, MainSection, RainSection, WeatherCondition, WeatherRecord,
    WindSection,
};
