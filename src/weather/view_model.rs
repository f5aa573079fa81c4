//! Pure transformation from the provider payload to the page view model

use crate::models::provider::{ProviderCurrent, ProviderForecastDay, ProviderLocation};
use crate::models::{
    ChartData, CurrentConditions, DaySummary, ForecastDay, ForecastResponse, ViewModel,
    WeatherCategory,
};

/// Keyword groups in priority order; the first group with a hit wins.
const CATEGORY_KEYWORDS: [(WeatherCategory, &[&str]); 3] = [
    (WeatherCategory::Rain, &["rain", "drizzle", "shower"]),
    (WeatherCategory::Snow, &["snow", "sleet", "blizzard"]),
    (WeatherCategory::Cloudy, &["cloud", "overcast"]),
];

/// Build the view model for one request. Performs no I/O.
#[must_use]
pub fn build_view_model(response: &ForecastResponse) -> ViewModel {
    let forecast: Vec<ForecastDay> = response
        .forecast
        .forecastday
        .iter()
        .map(project_day)
        .collect();

    ViewModel {
        location: location_label(&response.location),
        localtime: response.location.localtime.clone(),
        current: project_current(&response.current),
        chart: chart_data(&forecast),
        category: classify(&response.current.condition.text),
        alerts: response
            .alerts
            .as_ref()
            .map(|a| a.alert.clone())
            .unwrap_or_default(),
        forecast,
    }
}

/// Map a free-text condition onto one of the four background categories
#[must_use]
pub fn classify(condition_text: &str) -> WeatherCategory {
    let text = condition_text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map_or(WeatherCategory::Clear, |(category, _)| *category)
}

/// "City, Region Country", or "City, Country" when the region is blank
#[must_use]
pub fn location_label(location: &ProviderLocation) -> String {
    let raw = format!(
        "{}, {} {}",
        location.name.trim(),
        location.region.trim(),
        location.country.trim()
    );
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn project_current(current: &ProviderCurrent) -> CurrentConditions {
    CurrentConditions {
        temp_c: current.temp_c,
        temp_f: current.temp_f,
        condition_text: current.condition.text.clone(),
        condition_icon: current.condition.icon.clone(),
        wind_kph: current.wind_kph,
        wind_dir: current.wind_dir.clone(),
        humidity: current.humidity,
        feelslike_c: current.feelslike_c,
        vis_km: current.vis_km,
        cloud: current.cloud,
        gust_kph: current.gust_kph,
        uv: current.uv,
        precip_mm: current.precip_mm,
        aqi: current.air_quality.clone(),
    }
}

fn project_day(fd: &ProviderForecastDay) -> ForecastDay {
    ForecastDay {
        date: fd.date,
        day: DaySummary {
            maxtemp_c: fd.day.maxtemp_c,
            mintemp_c: fd.day.mintemp_c,
            avgtemp_c: fd.day.avgtemp_c,
            condition_text: fd.day.condition.text.clone(),
            condition_icon: fd.day.condition.icon.clone(),
            daily_chance_of_rain: fd.day.daily_chance_of_rain.unwrap_or(0),
            daily_chance_of_snow: fd.day.daily_chance_of_snow.unwrap_or(0),
            totalprecip_mm: fd.day.totalprecip_mm,
        },
        astro: fd.astro.clone(),
    }
}

fn chart_data(days: &[ForecastDay]) -> ChartData {
    let mut chart = ChartData::default();
    for fd in days {
        chart.dates.push(fd.date.format("%Y-%m-%d").to_string());
        chart.max_temps.push(fd.day.maxtemp_c);
        chart.min_temps.push(fd.day.mintemp_c);
        chart.avg_temps.push(fd.day.avgtemp_c);
        chart.rain_chances.push(fd.day.daily_chance_of_rain);
    }
    chart
}
