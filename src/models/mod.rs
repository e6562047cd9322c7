pub mod forecast;
pub mod darksky_forecast;
