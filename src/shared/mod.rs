use num_derive::{FromPrimitive, ToPrimitive};
use std::fmt;
use uom::si::{f64::*, length::foot};

/// The number of feet in a meter, as used throughout the simulation.
pub const FEET_PER_METER: f64 = 3.28084;

/// The number of feet in a nautical mile. Note this differs slightly from
/// the SI nautical mile (1852 m), as the simulation is defined by this value.
pub const FEET_PER_NAUTICAL_MILE: f64 = 6076.12;

/// The unit in which the aircraft's altitude is entered and displayed.
/// The discriminant is the value exchanged with the simulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum AltitudeUnit {
    Feet = 0,
    Meters = 1,
}
impl AltitudeUnit {
    /// Interprets the given altitude value in this unit.
    pub fn to_length(self, altitude: f64) -> Length {
        Length::new::<foot>(to_feet(altitude, self))
    }

    /// Expresses the given length in this unit, without rounding.
    pub fn from_length(self, length: Length) -> f64 {
        let feet = length.get::<foot>();
        match self {
            AltitudeUnit::Feet => feet,
            AltitudeUnit::Meters => to_meters(feet),
        }
    }

    /// Converts an altitude value in this unit into the given unit, preserving
    /// the feet equivalent. The result is rounded to a whole number, as it is
    /// what the user sees after switching units.
    pub fn convert(self, altitude: f64, to: AltitudeUnit) -> f64 {
        to.from_length(self.to_length(altitude)).round()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AltitudeUnit::Feet => "ft",
            AltitudeUnit::Meters => "m",
        }
    }
}
impl Default for AltitudeUnit {
    fn default() -> Self {
        AltitudeUnit::Feet
    }
}
impl fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Converts an altitude in the given unit to feet. Negative values are passed through.
pub fn to_feet(altitude: f64, unit: AltitudeUnit) -> f64 {
    match unit {
        AltitudeUnit::Feet => altitude,
        AltitudeUnit::Meters => altitude * FEET_PER_METER,
    }
}

pub fn to_meters(feet: f64) -> f64 {
    feet / FEET_PER_METER
}

pub fn nautical_miles_to_feet(nautical_miles: f64) -> f64 {
    nautical_miles * FEET_PER_NAUTICAL_MILE
}

/// Creates a length from a distance in nautical miles.
pub fn nautical_miles(nautical_miles: f64) -> Length {
    Length::new::<foot>(nautical_miles_to_feet(nautical_miles))
}

pub fn to_nautical_miles(length: Length) -> f64 {
    length.get::<foot>() / FEET_PER_NAUTICAL_MILE
}
