pub mod builder;
pub mod data;
pub mod settings;
pub mod transit;

pub use builder::{build_chart, ChartBuilder};
pub use data::{BirthInput, Chart, ChartSummary};
pub use settings::ChartSettings;
pub use transit::TransitSnapshot;
