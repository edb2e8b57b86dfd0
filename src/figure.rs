use crate::StationRow;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

const ZOOM: u8 = 12;
const MARKER_SIZE: u8 = 12;
const TRANSITION_MS: u32 = 500;
const CAPTION_FORMAT: &str = "%a %d %B, %Y at %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub enum MapStyle {
    Hosted { token: String },
    OpenStreetMap,
}

impl MapStyle {
    pub fn from_token(token: Option<String>) -> MapStyle {
        match token {
            Some(token) if !token.trim().is_empty() => MapStyle::Hosted { token },
            _ => MapStyle::OpenStreetMap,
        }
    }

    fn mapbox(&self, center: (f64, f64)) -> Value {
        let (lat, lon) = center;
        match self {
            MapStyle::Hosted { token } => json!({
                "accesstoken": token,
                "style": "streets",
                "center": { "lat": lat, "lon": lon },
                "zoom": ZOOM,
            }),
            MapStyle::OpenStreetMap => json!({
                "style": "open-street-map",
                "center": { "lat": lat, "lon": lon },
                "zoom": ZOOM,
            }),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MapFigure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl MapFigure {
    pub fn stations(city: &str, rows: &[StationRow], style: &MapStyle) -> MapFigure {
        let lat: Vec<f64> = rows.iter().map(|r| r.latitude).collect();
        let lon: Vec<f64> = rows.iter().map(|r| r.longitude).collect();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let free_bikes: Vec<i64> = rows.iter().map(|r| r.free_bikes).collect();
        let customdata: Vec<Value> = rows
            .iter()
            .map(|r| json!([r.empty_slots, r.free_bikes, r.ebikes, r.payment]))
            .collect();

        let trace = json!({
            "type": "scattermapbox",
            "mode": "markers",
            "lat": lat,
            "lon": lon,
            "text": names,
            "customdata": customdata,
            "hovertemplate": "<b>%{text}</b><br>empty_slots=%{customdata[0]}<br>free_bikes=%{customdata[1]}<br>ebikes=%{customdata[2]}<br>payment=%{customdata[3]}<extra></extra>",
            "marker": {
                "size": MARKER_SIZE,
                "color": free_bikes,
                "colorscale": "Plasma",
                "showscale": true,
                "colorbar": { "title": { "text": "free_bikes" } },
            },
        });

        let layout = json!({
            "title": { "text": map_title(city, rows) },
            "mapbox": style.mapbox(center(rows)),
            "margin": { "r": 0, "l": 0, "b": 0 },
            "transition": { "duration": TRANSITION_MS },
        });

        MapFigure {
            data: vec![trace],
            layout,
        }
    }

    pub fn message(text: &str, style: &MapStyle) -> MapFigure {
        let layout = json!({
            "mapbox": style.mapbox((0.0, 0.0)),
            "xaxis": { "visible": false },
            "yaxis": { "visible": false },
            "annotations": [{
                "text": text,
                "xref": "paper",
                "yref": "paper",
                "x": 0.5,
                "y": 0.5,
                "showarrow": false,
                "font": { "size": 18 },
            }],
        });

        MapFigure {
            data: Vec::new(),
            layout,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.layout["title"]["text"].as_str()
    }

    pub fn annotation(&self) -> Option<&str> {
        self.layout["annotations"][0]["text"].as_str()
    }
}

pub(crate) fn map_title(city: &str, rows: &[StationRow]) -> String {
    let caption = match freshest_timestamp(rows) {
        Some(at) => at.format(CAPTION_FORMAT).to_string(),
        None => "unknown time".to_string(),
    };
    format!("Map Showing Number of Bikes in {} at {}", city, caption)
}

fn freshest_timestamp(rows: &[StationRow]) -> Option<DateTime<Utc>> {
    rows.iter().filter_map(|r| parse_timestamp(&r.timestamp)).max()
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    // Some feeds drop the offset; those are UTC.
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|at| at.and_utc())
}

fn center(rows: &[StationRow]) -> (f64, f64) {
    if rows.is_empty() {
        return (0.0, 0.0);
    }
    let n = rows.len() as f64;
    let lat = rows.iter().map(|r| r.latitude).sum::<f64>() / n;
    let lon = rows.iter().map(|r| r.longitude).sum::<f64>() / n;
    (lat, lon)
}
