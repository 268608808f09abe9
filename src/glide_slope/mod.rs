//! The glide slope model: a stateless evaluation of where the aircraft is
//! relative to the reference glide slope and what the PAPI shows from there.
use crate::{
    error::{PapiError, Result},
    papi::{PapiLights, PapiPattern},
    shared::{nautical_miles, to_nautical_miles, AltitudeUnit},
};
use uom::si::{
    angle::{degree, radian},
    f64::*,
    length::foot,
};

/// Everything the model needs to evaluate an approach. Passed by value,
/// the model keeps no state between evaluations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideSlopeInputs {
    pub glide_slope: Angle,
    pub horizontal_distance: Length,
    /// The altitude value as entered, expressed in `altitude_unit`.
    pub altitude: f64,
    pub altitude_unit: AltitudeUnit,
    /// When true, the altitude is derived from the glide slope and distance
    /// and the entered `altitude` is disregarded.
    pub auto_mode: bool,
}
impl GlideSlopeInputs {
    pub fn new(
        glide_slope_degrees: f64,
        horizontal_distance_nautical_miles: f64,
        altitude: f64,
        altitude_unit: AltitudeUnit,
        auto_mode: bool,
    ) -> Self {
        Self {
            glide_slope: Angle::new::<degree>(glide_slope_degrees),
            horizontal_distance: nautical_miles(horizontal_distance_nautical_miles),
            altitude,
            altitude_unit,
            auto_mode,
        }
    }

    /// The altitude the model evaluates, in `altitude_unit`.
    pub fn effective_altitude(&self) -> f64 {
        if self.auto_mode {
            derive_altitude(self.glide_slope, self.horizontal_distance, self.altitude_unit)
        } else {
            self.altitude
        }
    }
}

/// The outcome of evaluating [`GlideSlopeInputs`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideSlopeIndication {
    aircraft_angle: Angle,
    deviation: Angle,
    lights: PapiLights,
}
impl GlideSlopeIndication {
    pub fn aircraft_angle(&self) -> Angle {
        self.aircraft_angle
    }

    /// Positive when the aircraft is above the glide slope.
    pub fn deviation(&self) -> Angle {
        self.deviation
    }

    pub fn lights(&self) -> PapiLights {
        self.lights
    }

    pub fn pattern(&self) -> PapiPattern {
        self.lights.pattern()
    }
}

/// Determines the altitude at which an aircraft at the given horizontal distance is
/// exactly on the glide slope. The result is expressed in the given unit and rounded
/// to a whole number.
pub fn derive_altitude(glide_slope: Angle, horizontal_distance: Length, unit: AltitudeUnit) -> f64 {
    let target_feet = glide_slope.get::<radian>().tan() * horizontal_distance.get::<foot>();

    AltitudeUnit::Feet.convert(target_feet, unit)
}

/// The elevation angle of the aircraft as seen from the runway threshold.
pub fn aircraft_angle(altitude: Length, horizontal_distance: Length) -> Result<Angle> {
    let distance_feet = horizontal_distance.get::<foot>();
    if !distance_feet.is_finite() || distance_feet <= 0. {
        return Err(PapiError::InvalidInput {
            name: "horizontal distance",
            value: to_nautical_miles(horizontal_distance),
        });
    }

    Ok(Angle::new::<radian>(
        (altitude.get::<foot>() / distance_feet).atan(),
    ))
}

pub fn deviation(aircraft_angle: Angle, glide_slope: Angle) -> Angle {
    aircraft_angle - glide_slope
}

pub fn evaluate(inputs: GlideSlopeInputs) -> Result<GlideSlopeIndication> {
    let altitude = inputs
        .altitude_unit
        .to_length(inputs.effective_altitude());
    let aircraft_angle = aircraft_angle(altitude, inputs.horizontal_distance)?;
    let deviation = deviation(aircraft_angle, inputs.glide_slope);

    Ok(GlideSlopeIndication {
        aircraft_angle,
        deviation,
        lights: PapiLights::from_deviation(deviation),
    })
}
