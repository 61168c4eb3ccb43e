//! JSON document layouts stored in the bucket, and assembly into
//! [`SnapshotParts`].
//!
//! Each data set lives in its own object and is wrapped in a single named
//! field, e.g. `{ "zones": [...] }`.

use dockside_core::dock::Dock;
use dockside_core::error::CoreError;
use dockside_core::load::LoadSchedule;
use dockside_core::sla::SlaMetric;
use dockside_core::snapshot::ZoneTemperature;
use dockside_core::source::SnapshotParts;
use dockside_core::types::Timestamp;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::CloudError;

/// Object key of the zone temperature document.
pub const KEY_TEMPERATURE: &str = "temperature/temperature-zones.json";

/// Object key of the dock board document.
pub const KEY_DOCKS: &str = "docks/docks-data.json";

/// Object key of the load schedule document.
pub const KEY_LOADS: &str = "loads/loads-data.json";

/// Object key of the SLA document.
pub const KEY_SLA: &str = "sla/sla-data.json";

#[derive(Debug, Deserialize)]
pub struct TemperatureDocument {
    pub zones: Vec<ZoneTemperature>,
}

#[derive(Debug, Deserialize)]
pub struct DocksDocument {
    pub docks: Vec<Dock>,
}

#[derive(Debug, Deserialize)]
pub struct LoadsDocument {
    pub loads: LoadSchedule,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaDocument {
    pub provider_performance: Vec<SlaMetric>,
}

/// Parse an object body, naming the key in the error.
pub fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, CloudError> {
    serde_json::from_slice(bytes).map_err(|source| CloudError::Decode {
        key: key.to_string(),
        source,
    })
}

/// Combine the four document loads into snapshot parts generated at `now`.
/// A failed document leaves only its own section failed.
pub fn assemble(
    now: Timestamp,
    temperature: Result<TemperatureDocument, CloudError>,
    docks: Result<DocksDocument, CloudError>,
    loads: Result<LoadsDocument, CloudError>,
    sla: Result<SlaDocument, CloudError>,
) -> SnapshotParts {
    SnapshotParts {
        generated_at: now,
        temperatures: temperature.map(|d| d.zones).map_err(CoreError::from),
        docks: docks.map(|d| d.docks).map_err(CoreError::from),
        loads: loads.map(|d| d.loads).map_err(CoreError::from),
        sla: sla.map(|d| d.provider_performance).map_err(CoreError::from),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{NaiveDate, TimeZone, Utc};
    use dockside_core::dock::DockStatus;

    use super::*;

    #[test]
    fn decodes_temperature_document() {
        let body = br#"{
            "zones": [
                {
                    "zone": "frozen",
                    "currentTemp": -18.4,
                    "history": [
                        { "zone": "frozen", "temperature": -18.1, "time": "2026-09-01T07:00:00Z" },
                        { "zone": "frozen", "temperature": -18.4, "time": "2026-09-01T08:00:00Z" }
                    ]
                },
                { "zone": "dry", "currentTemp": 21.5 }
            ]
        }"#;
        let doc: TemperatureDocument = decode(KEY_TEMPERATURE, body).unwrap();
        assert_eq!(doc.zones.len(), 2);
        assert_eq!(doc.zones[0].history.len(), 2);
        assert!(doc.zones[1].history.is_empty());
    }

    #[test]
    fn decodes_sla_and_docks_documents() {
        let sla: SlaDocument = decode(
            KEY_SLA,
            br#"{"providerPerformance":[{"metric":"On-Time Delivery","target":95,"actual":94.5}]}"#,
        )
        .unwrap();
        assert_eq!(sla.provider_performance[0].target, 95.0);

        let docks: DocksDocument = decode(
            KEY_DOCKS,
            br#"{"docks":[{"id":"dock-6","name":"Dock 6","zone":"fresh","status":"maintenance","currentLoad":null,"eta":null}]}"#,
        )
        .unwrap();
        assert_eq!(docks.docks[0].status, DockStatus::Maintenance);
        assert_eq!(docks.docks[0].progress, 0);
    }

    #[test]
    fn decode_error_names_key() {
        let err = decode::<LoadsDocument>(KEY_LOADS, b"not json").unwrap_err();
        assert_matches!(&err, CloudError::Decode { key, .. } if key == KEY_LOADS);
        assert!(err.to_string().contains(KEY_LOADS));
    }

    #[test]
    fn assembles_snapshot() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 8, 5, 0).unwrap();
        let loads = decode::<LoadsDocument>(
            KEY_LOADS,
            br#"{"loads":{"2026-09-01":[{"id":"LD-1","carrier":"Sysco","tempZone":"fresh","status":"arriving","dock":null,"scheduledTime":"09:00"}]}}"#,
        );
        let snapshot = assemble(
            now,
            Ok(TemperatureDocument { zones: Vec::new() }),
            Ok(DocksDocument { docks: Vec::new() }),
            loads,
            Ok(SlaDocument {
                provider_performance: Vec::new(),
            }),
        )
        .into_snapshot()
        .unwrap();
        assert_eq!(snapshot.generated_at, now);
        let day = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        assert_eq!(snapshot.loads[&day][0].carrier, "Sysco");
    }

    #[test]
    fn assemble_keeps_sections_when_sla_fails() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 8, 5, 0).unwrap();
        let temperature = decode::<TemperatureDocument>(
            KEY_TEMPERATURE,
            br#"{"zones":[{"zone":"dairy","currentTemp":3.4}]}"#,
        );
        let sla = Err(CloudError::Request {
            key: KEY_SLA.into(),
            message: "AccessDenied".into(),
        });

        let parts = assemble(
            now,
            temperature,
            Ok(DocksDocument { docks: Vec::new() }),
            Ok(LoadsDocument {
                loads: LoadSchedule::new(),
            }),
            sla,
        );

        assert_eq!(parts.temperatures.as_ref().unwrap()[0].zone, "dairy");
        assert!(parts.docks.is_ok());
        assert!(parts.loads.is_ok());
        assert_matches!(&parts.sla, Err(CoreError::Internal(msg)) if msg.contains(KEY_SLA));
    }
}
