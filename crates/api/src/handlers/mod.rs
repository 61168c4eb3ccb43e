pub mod alerts;
pub mod docks;
pub mod loads;
pub mod metrics;
pub mod sla;
pub mod temperature;
pub mod zones;
