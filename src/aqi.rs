//! EPA Air Quality Index derivation for PM2.5.
//!
//! Piecewise-linear interpolation over the US EPA PM2.5 breakpoints. The
//! expected values can be checked against the calculator at
//! <https://www.airnow.gov/aqi/aqi-calculator-concentration/>.

/// EPA AQI category, in increasing order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    /// The EPA label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }

    /// The EPA display color for this category, as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Good => "#00E400",
            Category::Moderate => "#FFFF00",
            Category::UnhealthySensitive => "#FF7E00",
            Category::Unhealthy => "#FF0000",
            Category::VeryUnhealthy => "#8F3F97",
            Category::Hazardous => "#7E0023",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived Air Quality Index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aqi {
    /// AQI on the 0–500 scale.
    pub value: u16,
    pub category: Category,
}

impl Aqi {
    /// Display color of the category, as a hex string.
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// AQI engine input failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AqiError {
    /// The PM2.5 concentration was NaN or infinite.
    #[cfg_attr(
        feature = "thiserror",
        error("PM2.5 concentration is not a finite number")
    )]
    InvalidInput,
}

struct Breakpoint {
    pm_lo: f32,
    pm_hi: f32,
    aqi_lo: u16,
    aqi_hi: u16,
    category: Category,
}

// US EPA PM2.5 breakpoints (µg/m³ → AQI), 24-hour averaging.
#[rustfmt::skip]
const BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint { pm_lo: 0.0, pm_hi: 12.0, aqi_lo: 0, aqi_hi: 50, category: Category::Good },
    Breakpoint { pm_lo: 12.1, pm_hi: 35.4, aqi_lo: 51, aqi_hi: 100, category: Category::Moderate },
    Breakpoint { pm_lo: 35.5, pm_hi: 55.4, aqi_lo: 101, aqi_hi: 150, category: Category::UnhealthySensitive },
    Breakpoint { pm_lo: 55.5, pm_hi: 150.4, aqi_lo: 151, aqi_hi: 200, category: Category::Unhealthy },
    Breakpoint { pm_lo: 150.5, pm_hi: 250.4, aqi_lo: 201, aqi_hi: 300, category: Category::VeryUnhealthy },
    Breakpoint { pm_lo: 250.5, pm_hi: 500.4, aqi_lo: 301, aqi_hi: 500, category: Category::Hazardous },
];

/// Derives the AQI for a PM2.5 concentration in µg/m³.
///
/// Negative input is clamped to zero (sensor noise floor); NaN and infinite
/// input are rejected. Concentrations above the top breakpoint saturate at
/// AQI 500 / Hazardous rather than extrapolating.
///
/// Linear interpolation formula from the EPA documentation:
/// `AQI = (AQIhi − AQIlo) / (PMhi − PMlo) × (PM − PMlo) + AQIlo`,
/// rounded half-up to the nearest integer.
pub fn compute_aqi(pm25: f32) -> Result<Aqi, AqiError> {
    if !pm25.is_finite() {
        return Err(AqiError::InvalidInput);
    }
    let pm25 = if pm25 < 0.0 { 0.0 } else { pm25 };

    for bp in &BREAKPOINTS {
        if pm25 <= bp.pm_hi {
            let slope = (bp.aqi_hi - bp.aqi_lo) as f32 / (bp.pm_hi - bp.pm_lo);
            let aqi = slope * (pm25 - bp.pm_lo) + bp.aqi_lo as f32;
            return Ok(Aqi {
                value: libm::roundf(aqi) as u16,
                category: bp.category,
            });
        }
    }

    Ok(Aqi {
        value: 500,
        category: Category::Hazardous,
    })
}
