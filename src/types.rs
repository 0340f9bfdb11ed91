use crate::aqi::Aqi;

/// One decoded SEN0460 data frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Mass Concentration PM1.0 [μg/m³] (CF=1, standard particle)
    pub pm1_0_std: u16,
    /// Mass Concentration PM2.5 [μg/m³] (CF=1, standard particle)
    pub pm2_5_std: u16,
    /// Mass Concentration PM10 [μg/m³] (CF=1, standard particle)
    pub pm10_std: u16,
    /// Mass Concentration PM1.0 [μg/m³] (atmospheric environment)
    pub pm1_0_atm: u16,
    /// Mass Concentration PM2.5 [μg/m³] (atmospheric environment)
    pub pm2_5_atm: u16,
    /// Mass Concentration PM10 [μg/m³] (atmospheric environment)
    pub pm10_atm: u16,
    /// Particles with diameter ≥0.3 μm per 0.1 L of air
    pub particles_0_3um: u16,
    /// Particles with diameter ≥0.5 μm per 0.1 L of air
    pub particles_0_5um: u16,
    /// Particles with diameter ≥1.0 μm per 0.1 L of air
    pub particles_1_0um: u16,
    /// Particles with diameter ≥2.5 μm per 0.1 L of air
    pub particles_2_5um: u16,
    /// Particles with diameter ≥5.0 μm per 0.1 L of air
    pub particles_5_0um: u16,
    /// Particles with diameter ≥10 μm per 0.1 L of air
    pub particles_10um: u16,
    /// Firmware version byte carried inside the frame
    pub version: u8,
    /// Error code byte reported by the sensor (0 when healthy)
    pub error_code: u8,
}

/// Firmware version read from the dedicated version register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirmwareVersion(pub u8);

/// A complete reading: the decoded measurement, the AQI derived from its
/// atmospheric PM2.5 value and whether the sensor had completed its warmup
/// period at the time of the read.
///
/// Built fresh on every [`Sen0460::read`](crate::Sen0460::read) call, never
/// cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    pub measurement: Measurement,
    pub aqi: Aqi,
    pub warmed_up: bool,
}
