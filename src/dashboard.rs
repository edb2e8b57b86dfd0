use crate::{build_rows, Config, Gateway, MapFigure, MapStyle};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

const TITLE: &str = "dashboard for bike stations visualisation";
const PROMPT: &str = "enter the city you want to visualize it's bike stations";
const FOOTER_TEXT: &str = "check source code in my github";

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
<style>
body { font-family: sans-serif; margin: 0 2em; }
.title { text-transform: uppercase; text-align: center; }
#graph { height: 70vh; }
</style>
</head>
<body>
<h3 class="uppercase title">{{TITLE}}</h3>
<div id="graph"></div>
<p><em>{{PROMPT}}</em></p>
<select id="input_city">
{{OPTIONS}}
</select>
<br>
<a id="github" href="{{FOOTER_HREF}}" target="_blank">{{FOOTER_TEXT}}</a>
<script>
const select = document.getElementById("input_city");
async function showMap(city) {
  const res = await fetch("/figure?city=" + encodeURIComponent(city));
  const figure = await res.json();
  Plotly.react("graph", figure.data, figure.layout);
}
select.addEventListener("change", (event) => showMap(event.target.value));
showMap(select.value);
</script>
</body>
</html>
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: String,
    pub prompt: String,
    pub cities: Vec<String>,
    pub default_city: String,
    pub footer_text: String,
    pub footer_href: String,
}

impl Layout {
    pub fn new(cities: Vec<String>, config: &Config) -> Layout {
        let default_city = if cities.iter().any(|c| c == &config.default_city) {
            config.default_city.clone()
        } else {
            cities
                .first()
                .cloned()
                .unwrap_or_else(|| config.default_city.clone())
        };

        Layout {
            title: TITLE.to_string(),
            prompt: PROMPT.to_string(),
            cities,
            default_city,
            footer_text: FOOTER_TEXT.to_string(),
            footer_href: config.footer_url.clone(),
        }
    }

    pub fn render_html(&self) -> String {
        let options = self
            .cities
            .iter()
            .map(|city| {
                let selected = if city == &self.default_city {
                    " selected"
                } else {
                    ""
                };
                format!(
                    "<option value=\"{0}\"{1}>{0}</option>",
                    escape(city),
                    selected
                )
            })
            .collect::<Vec<String>>()
            .join("\n");

        PAGE.replace("{{TITLE}}", &escape(&self.title))
            .replace("{{PROMPT}}", &escape(&self.prompt))
            .replace("{{FOOTER_HREF}}", &escape(&self.footer_href))
            .replace("{{FOOTER_TEXT}}", &escape(&self.footer_text))
            .replace("{{OPTIONS}}", &options)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Idle,
    Rendering { city: String },
}

pub struct Dashboard {
    gateway: Gateway,
    layout: Layout,
    style: MapStyle,
    // Also serializes renders: one selection finishes before the next starts.
    state: Mutex<RenderState>,
}

impl Dashboard {
    pub fn new(gateway: Gateway, layout: Layout, style: MapStyle) -> Dashboard {
        Dashboard {
            gateway,
            layout,
            style,
            state: Mutex::new(RenderState::Idle),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub async fn state(&self) -> RenderState {
        self.state.lock().await.clone()
    }

    /// Runs the whole pipeline for `city`. Failures become a message panel.
    pub async fn render(&self, city: &str) -> MapFigure {
        let mut state = self.state.lock().await;
        *state = RenderState::Rendering {
            city: city.to_string(),
        };

        let stations = match self.gateway.stations_for_city(city).await {
            Ok(stations) => stations,
            Err(err) if err.is_not_found() => {
                warn!(city, "no bike network found");
                return MapFigure::message(
                    &format!("No bike network found for {}", city),
                    &self.style,
                );
            }
            Err(err) => {
                warn!(city, error = %err, "could not load stations");
                return MapFigure::message(
                    &format!("Could not load stations for {}: {}", city, err),
                    &self.style,
                );
            }
        };

        let rows = build_rows(&stations);
        if rows.is_empty() {
            warn!(city, "network reports no stations");
            return MapFigure::message(
                &format!("No stations reported for {}", city),
                &self.style,
            );
        }

        info!(city, stations = rows.len(), "rendered map");
        MapFigure::stations(city, &rows, &self.style)
    }
}

#[derive(Debug, Deserialize)]
struct FigureParams {
    city: Option<String>,
}

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/figure", get(figure_handler))
        .route("/cities", get(cities_handler))
        .with_state(dashboard)
}

async fn index_handler(State(dashboard): State<Arc<Dashboard>>) -> Html<String> {
    Html(dashboard.layout().render_html())
}

async fn figure_handler(
    State(dashboard): State<Arc<Dashboard>>,
    Query(params): Query<FigureParams>,
) -> Json<MapFigure> {
    let city = params
        .city
        .unwrap_or_else(|| dashboard.layout().default_city.clone());
    Json(dashboard.render(&city).await)
}

async fn cities_handler(State(dashboard): State<Arc<Dashboard>>) -> Json<Vec<String>> {
    Json(dashboard.layout().cities.clone())
}
