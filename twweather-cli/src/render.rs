//! Themed terminal rendering of the weather card.
//!
//! The palette follows the day/night moment of the selected city: dark text
//! for daytime (light terminal themes), light text at night.

use anyhow::Result;
use chrono::Utc;
use chrono_tz::Asia::Taipei;
use crossterm::style::{Color, Stylize};

use twweather_core::{LocationEntry, Moment, WeatherKind, WeatherReading, moment};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: Color,
    pub temperature: Color,
    pub text: Color,
}

impl Theme {
    pub fn for_moment(moment: Moment) -> Self {
        match moment {
            Moment::Day => Self {
                title: Color::Rgb { r: 0x21, g: 0x21, b: 0x21 },
                temperature: Color::Rgb { r: 0x75, g: 0x75, b: 0x75 },
                text: Color::Rgb { r: 0x82, g: 0x82, b: 0x82 },
            },
            Moment::Night => Self {
                title: Color::Rgb { r: 0xf9, g: 0xf9, b: 0xfa },
                temperature: Color::Rgb { r: 0xdd, g: 0xdd, b: 0xdd },
                text: Color::Rgb { r: 0xcc, g: 0xcc, b: 0xcc },
            },
        }
    }
}

/// The card as plain lines: title, description, temperature row, comfort row,
/// observation-time row. Colors are applied at print time.
pub fn card_lines(
    location: &LocationEntry,
    reading: &WeatherReading,
    moment: Moment,
) -> Vec<String> {
    let glyph = match WeatherKind::classify(reading.weather_code) {
        Ok(kind) => kind.glyph(moment),
        // Out-of-range code: render the card without an icon.
        Err(_) => "",
    };

    let observed = reading
        .observation_time
        .with_timezone(&Taipei)
        .format("%H:%M")
        .to_string();

    let spinner = if reading.is_loading { "（更新中…）" } else { "" };

    vec![
        format!("{}（測站：{}）", location.city_name, reading.location_name),
        format!("{} {}", reading.description, glyph),
        format!(
            "{:.1}°C  降雨 {:.0}%  風速 {:.1} m/s",
            reading.temperature, reading.rain_possibility, reading.wind_speed
        ),
        reading.comfortability.clone(),
        format!("觀測時間 {observed} {spinner}"),
    ]
}

/// Print the card for the location's current moment.
pub fn print_card(location: &LocationEntry, reading: &WeatherReading) -> Result<()> {
    let moment = moment::classify(location.sunrise_city_name, Utc::now())?;
    let theme = Theme::for_moment(moment);
    let lines = card_lines(location, reading, moment);

    println!();
    for (index, line) in lines.iter().enumerate() {
        let styled = match index {
            0 => line.clone().with(theme.title).bold(),
            2 => line.clone().with(theme.temperature),
            _ => line.clone().with(theme.text),
        };
        println!("  {styled}");
    }
    println!();

    Ok(())
}
