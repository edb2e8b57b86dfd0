use crate::RawStation;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub const NO_EBIKES: &str = "no ebikes";
pub const NO_CARD_PAYMENT: &str = "no card payment";

#[derive(Debug, Clone, PartialEq)]
pub enum Ebikes {
    Count(i64),
    Other(Value),
    Missing,
}

impl Serialize for Ebikes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ebikes::Count(n) => serializer.serialize_i64(*n),
            Ebikes::Other(value) => value.serialize(serializer),
            Ebikes::Missing => serializer.serialize_str(NO_EBIKES),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StationRow {
    #[serde(rename = "Station Name")]
    pub name: String,

    pub empty_slots: i64,

    pub free_bikes: i64,

    pub latitude: f64,

    pub longitude: f64,

    pub timestamp: String,

    pub ebikes: Ebikes,

    pub payment: String,

    #[serde(rename = "Unique ID")]
    pub unique_id: String,
}

impl From<&RawStation> for StationRow {
    fn from(station: &RawStation) -> Self {
        // A missing `extra` behaves like one without any optional keys.
        let empty = Map::new();
        let extra = station.extra.as_ref().unwrap_or(&empty);

        let ebikes = match extra.get("ebikes") {
            Some(Value::Null) | None => Ebikes::Missing,
            Some(value) => match value.as_i64() {
                Some(n) => Ebikes::Count(n),
                None => Ebikes::Other(value.clone()),
            },
        };

        let payment = match extra.get("payment") {
            Some(value) => payment_text(value),
            None => NO_CARD_PAYMENT.to_string(),
        };

        let unique_id = match extra.get("uid") {
            Some(Value::String(uid)) => uid.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        StationRow {
            name: station.name.clone(),
            empty_slots: station.empty_slots,
            free_bikes: station.free_bikes,
            latitude: station.latitude,
            longitude: station.longitude,
            timestamp: station.timestamp.clone(),
            ebikes,
            payment,
            unique_id,
        }
    }
}

// Feeds report payment either as a single string or as a list of methods.
fn payment_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(methods) => methods
            .iter()
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<String>>()
            .join(", "),
        other => other.to_string(),
    }
}

pub fn build_rows(stations: &[RawStation]) -> Vec<StationRow> {
    stations.iter().map(StationRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawStation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn builds_row_for_paris_station() {
        let station = raw(json!({
            "name": "Station A",
            "empty_slots": 3,
            "free_bikes": 7,
            "latitude": 48.86,
            "longitude": 2.35,
            "timestamp": "2024-01-01T00:00:00Z",
            "extra": { "uid": "42" }
        }));

        let rows = build_rows(&[station]);
        assert_eq!(rows.len(), 1);

        let row = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(
            row,
            json!({
                "Station Name": "Station A",
                "empty_slots": 3,
                "free_bikes": 7,
                "latitude": 48.86,
                "longitude": 2.35,
                "timestamp": "2024-01-01T00:00:00Z",
                "ebikes": "no ebikes",
                "payment": "no card payment",
                "Unique ID": "42"
            })
        );
    }

    #[test]
    fn missing_extra_defaults_every_sentinel() {
        let station = raw(json!({
            "name": "Gare du Midi",
            "empty_slots": null,
            "free_bikes": 2,
            "latitude": 50.83,
            "longitude": 4.33,
            "timestamp": "2024-03-05T10:15:00.123000Z"
        }));

        let row = StationRow::from(&station);
        assert_eq!(row.ebikes, Ebikes::Missing);
        assert_eq!(row.payment, NO_CARD_PAYMENT);
        assert_eq!(row.unique_id, "");
        assert_eq!(row.empty_slots, 0);
    }

    #[test]
    fn copies_present_extra_fields() {
        let station = raw(json!({
            "name": "Bastille",
            "empty_slots": 10,
            "free_bikes": 5,
            "latitude": 48.85,
            "longitude": 2.37,
            "timestamp": "2024-01-01T00:00:00Z",
            "extra": { "ebikes": 4, "payment": ["key", "creditcard"], "uid": 1203 }
        }));

        let row = StationRow::from(&station);
        assert_eq!(row.ebikes, Ebikes::Count(4));
        assert_eq!(row.payment, "key, creditcard");
        assert_eq!(row.unique_id, "1203");
    }

    #[test]
    fn copies_negative_and_fractional_values() {
        let station = raw(json!({
            "name": "Offline dock",
            "empty_slots": -1,
            "free_bikes": -3,
            "latitude": 48.85,
            "longitude": 2.37,
            "timestamp": "2024-01-01T00:00:00Z",
            "extra": { "ebikes": -2 }
        }));

        let row = StationRow::from(&station);
        assert_eq!(row.empty_slots, -1);
        assert_eq!(row.free_bikes, -3);
        assert_eq!(row.ebikes, Ebikes::Count(-2));

        let mut station = station;
        station.extra = Some(json!({ "ebikes": 1.5 }).as_object().unwrap().clone());
        let row = StationRow::from(&station);
        assert_eq!(row.ebikes, Ebikes::Other(json!(1.5)));
        assert_eq!(serde_json::to_value(&row).unwrap()["ebikes"], json!(1.5));

        station.extra = Some(json!({ "ebikes": null }).as_object().unwrap().clone());
        assert_eq!(StationRow::from(&station).ebikes, Ebikes::Missing);
    }

    #[test]
    fn one_row_per_station_in_order() {
        let stations: Vec<RawStation> = (0..5)
            .map(|i| {
                raw(json!({
                    "name": format!("Station {}", i),
                    "empty_slots": i,
                    "free_bikes": 1,
                    "latitude": 48.0 + f64::from(i) / 100.0,
                    "longitude": 2.0,
                    "timestamp": format!("2024-01-01T00:0{}:00Z", i),
                    "extra": {}
                }))
            })
            .collect();

        let rows = build_rows(&stations);
        assert_eq!(rows.len(), stations.len());
        for (row, station) in rows.iter().zip(&stations) {
            assert_eq!(row.name, station.name);
            assert_eq!(row.latitude, station.latitude);
            assert_eq!(row.longitude, station.longitude);
            assert_eq!(row.timestamp, station.timestamp);
        }
    }
}
