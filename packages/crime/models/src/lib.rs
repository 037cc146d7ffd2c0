#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crime type enumeration and severity table.
//!
//! Every incident filed against the case-management backend carries exactly
//! one [`CrimeType`]. The enumeration is closed and its declaration order is
//! canonical: it is the order used when counting categories inside a hotspot
//! and when breaking ties for the dominant category.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Highest base severity a crime type can carry.
pub const MAX_SEVERITY: u8 = 100;

/// Crime types an incident can be filed under, in canonical order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeType {
    /// Murder and non-negligent manslaughter
    Homicide,
    /// Forcible sexual offenses
    SexualAssault,
    /// Abduction or unlawful restraint of a person
    Kidnapping,
    /// Taking property by force or threat
    Robbery,
    /// Physical attack on a person
    Assault,
    /// Intentional destruction of property by fire
    Arson,
    /// Violence or abuse between household members or partners
    DomesticViolence,
    /// Unlawful entry to commit a felony or theft
    Burglary,
    /// Unlawful possession or use of weapons
    Weapons,
    /// Possession, sale or manufacture of controlled substances
    Drugs,
    /// Theft of a motor vehicle
    MotorVehicleTheft,
    /// Deception for financial gain, including identity theft
    Fraud,
    /// Unlawful taking of property without force
    Theft,
    /// Willful destruction or damage of property
    Vandalism,
    /// Repeated unwanted contact or intimidation
    Harassment,
    /// Disturbing the peace, trespassing and similar offenses
    PublicDisorder,
    /// Anything not covered above
    Other,
}

impl CrimeType {
    /// Returns the base severity (0-100) for this crime type.
    ///
    /// The most severe types sit at or near [`MAX_SEVERITY`]; [`Self::Other`]
    /// is the lowest bucket.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Homicide => 100,
            Self::SexualAssault | Self::Kidnapping => 95,
            Self::Robbery => 85,
            Self::Assault | Self::Arson => 80,
            Self::DomesticViolence => 75,
            Self::Burglary | Self::Weapons => 65,
            Self::Drugs | Self::MotorVehicleTheft => 55,
            Self::Fraud | Self::Theft => 45,
            Self::Vandalism | Self::Harassment => 40,
            Self::PublicDisorder => 35,
            Self::Other => 30,
        }
    }

    /// Maps a raw category label onto the enumeration.
    ///
    /// Matching is case-insensitive and treats spaces and hyphens like
    /// underscores, so `"motor vehicle theft"` and `"MOTOR_VEHICLE_THEFT"`
    /// are the same type. Unrecognized labels fall back to [`Self::Other`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        normalized.parse().unwrap_or(Self::Other)
    }

    /// Returns the position of this type in the canonical order.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Returns all variants of this enum in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Homicide,
            Self::SexualAssault,
            Self::Kidnapping,
            Self::Robbery,
            Self::Assault,
            Self::Arson,
            Self::DomesticViolence,
            Self::Burglary,
            Self::Weapons,
            Self::Drugs,
            Self::MotorVehicleTheft,
            Self::Fraud,
            Self::Theft,
            Self::Vandalism,
            Self::Harassment,
            Self::PublicDisorder,
            Self::Other,
        ]
    }
}

impl From<String> for CrimeType {
    fn from(value: String) -> Self {
        Self::from_raw(&value)
    }
}
