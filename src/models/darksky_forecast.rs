use serde::Deserialize;

#[derive(Deserialize)]
pub struct HourlyData {
    pub time: i64,
    #[serde(rename = "precipIntensity", default)]
    pub precip_intensity: f64,
    #[serde(rename = "precipProbability", default)]
    pub precip_probability: f64,
}

#[derive(Deserialize, Default)]
pub struct Hourly {
    #[serde(default)]
    pub data: Vec<HourlyData>,
}

#[derive(Deserialize)]
pub struct ForecastResponse {
    /// Offset from UTC in hours for the requested location
    pub offset: Option<f64>,
    #[serde(default)]
    pub hourly: Hourly,
}
