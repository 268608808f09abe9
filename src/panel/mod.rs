//! The controls through which the user sets up the approach. The panel owns
//! the inputs of the glide slope model and keeps the altitude on the glide
//! slope while auto mode is engaged.
use crate::{
    error::{PapiError, Result},
    glide_slope::{self, GlideSlopeInputs},
    shared::{nautical_miles, AltitudeUnit},
    simulation::{SimulationElement, SimulatorReader, SimulatorWriter},
};
use num_traits::{FromPrimitive, ToPrimitive};
use std::ops::RangeInclusive;
use tracing::{debug, warn};
use uom::si::{angle::degree, f64::*};

/// The ranges within which the panel's selectors operate.
#[derive(Clone, Debug, PartialEq)]
pub struct ApproachPanelLimits {
    /// In degrees. Must lie within `[0, 90)`.
    pub glide_slope: RangeInclusive<f64>,
    /// In nautical miles. Must remain strictly positive.
    pub horizontal_distance: RangeInclusive<f64>,
}
impl ApproachPanelLimits {
    const MAX_GLIDE_SLOPE: f64 = 90.;

    /// Checks the ranges are finite, not reversed and keep the model's inputs
    /// valid, so that clamping never hands the model a distance it rejects.
    pub fn validate(&self) -> Result<()> {
        let (start, end) = (*self.glide_slope.start(), *self.glide_slope.end());
        check("glide slope limit", start, start.is_finite() && start >= 0.)?;
        check(
            "glide slope limit",
            end,
            end.is_finite() && end >= start && end < Self::MAX_GLIDE_SLOPE,
        )?;

        let (start, end) = (
            *self.horizontal_distance.start(),
            *self.horizontal_distance.end(),
        );
        check("horizontal distance limit", start, start.is_finite() && start > 0.)?;
        check("horizontal distance limit", end, end.is_finite() && end >= start)
    }
}
impl Default for ApproachPanelLimits {
    fn default() -> Self {
        Self {
            glide_slope: 2.0..=4.0,
            horizontal_distance: 1.0..=10.0,
        }
    }
}

fn check(name: &'static str, value: f64, valid: bool) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(PapiError::InvalidInput { name, value })
    }
}

pub struct ApproachPanel {
    limits: ApproachPanelLimits,
    glide_slope: f64,
    horizontal_distance: f64,
    altitude: f64,
    altitude_unit: AltitudeUnit,
    auto_mode: bool,
}
impl ApproachPanel {
    pub const GLIDE_SLOPE_KEY: &'static str = "PAPI_GLIDE_SLOPE";
    pub const HORIZONTAL_DISTANCE_KEY: &'static str = "PAPI_HORIZONTAL_DISTANCE";
    pub const ALTITUDE_KEY: &'static str = "PAPI_ALTITUDE";
    pub const ALTITUDE_UNIT_KEY: &'static str = "PAPI_ALTITUDE_UNIT";
    pub const ALTITUDE_EDITABLE_KEY: &'static str = "PAPI_ALTITUDE_EDITABLE";
    pub const AUTO_MODE_KEY: &'static str = "PAPI_AUTO_MODE";

    const DEFAULT_GLIDE_SLOPE: f64 = 3.;
    const DEFAULT_HORIZONTAL_DISTANCE: f64 = 5.;

    pub fn new() -> Self {
        Self::from_valid_limits(ApproachPanelLimits::default())
    }

    /// Creates a panel operating within the given limits. Fails when the
    /// limits would let an invalid input reach the glide slope model.
    pub fn with_limits(limits: ApproachPanelLimits) -> Result<Self> {
        if let Err(error) = limits.validate() {
            warn!(%error, "Rejecting approach panel limits");
            return Err(error);
        }

        Ok(Self::from_valid_limits(limits))
    }

    fn from_valid_limits(limits: ApproachPanelLimits) -> Self {
        let mut panel = Self {
            glide_slope: clamp(Self::DEFAULT_GLIDE_SLOPE, &limits.glide_slope),
            horizontal_distance: clamp(
                Self::DEFAULT_HORIZONTAL_DISTANCE,
                &limits.horizontal_distance,
            ),
            limits,
            altitude: 0.,
            altitude_unit: AltitudeUnit::Feet,
            auto_mode: true,
        };
        panel.derive_altitude_when_auto();

        panel
    }

    pub fn limits(&self) -> &ApproachPanelLimits {
        &self.limits
    }

    pub fn glide_slope(&self) -> Angle {
        Angle::new::<degree>(self.glide_slope)
    }

    pub fn glide_slope_degrees(&self) -> f64 {
        self.glide_slope
    }

    /// Sets the reference glide slope in degrees, within the panel's limits.
    pub fn set_glide_slope(&mut self, degrees: f64) {
        if let Some(degrees) = accept("glide slope", degrees, &self.limits.glide_slope) {
            if degrees != self.glide_slope {
                self.glide_slope = degrees;
                self.derive_altitude_when_auto();
            }
        }
    }

    pub fn horizontal_distance(&self) -> Length {
        nautical_miles(self.horizontal_distance)
    }

    pub fn horizontal_distance_nautical_miles(&self) -> f64 {
        self.horizontal_distance
    }

    /// Sets the horizontal distance to the runway threshold in nautical miles,
    /// within the panel's limits.
    pub fn set_horizontal_distance(&mut self, nautical_miles: f64) {
        if let Some(nautical_miles) = accept(
            "horizontal distance",
            nautical_miles,
            &self.limits.horizontal_distance,
        ) {
            if nautical_miles != self.horizontal_distance {
                self.horizontal_distance = nautical_miles;
                self.derive_altitude_when_auto();
            }
        }
    }

    /// The altitude as displayed, in [`Self::altitude_unit`].
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn altitude_length(&self) -> Length {
        self.altitude_unit.to_length(self.altitude)
    }

    pub fn altitude_is_editable(&self) -> bool {
        !self.auto_mode
    }

    /// Sets the altitude in [`Self::altitude_unit`]. Has no effect in auto mode,
    /// as the altitude is derived then.
    pub fn set_altitude(&mut self, altitude: f64) {
        if !self.altitude_is_editable() {
            if altitude != self.altitude {
                debug!(altitude, "Ignoring altitude entry while in auto mode");
            }
        } else if altitude.is_finite() {
            self.altitude = altitude;
        } else {
            warn!(altitude, "Rejecting non-finite altitude");
        }
    }

    pub fn altitude_unit(&self) -> AltitudeUnit {
        self.altitude_unit
    }

    /// Switches the unit in which the altitude is displayed. The altitude
    /// keeps its feet equivalent, rounded to a whole number in the new unit.
    pub fn set_altitude_unit(&mut self, unit: AltitudeUnit) {
        if unit == self.altitude_unit {
            return;
        }

        self.altitude = self.altitude_unit.convert(self.altitude, unit);
        self.altitude_unit = unit;
        self.derive_altitude_when_auto();
    }

    pub fn is_auto_mode(&self) -> bool {
        self.auto_mode
    }

    /// When engaged, the altitude follows the glide slope at the current distance.
    pub fn set_auto_mode(&mut self, auto_mode: bool) {
        if auto_mode != self.auto_mode {
            self.auto_mode = auto_mode;
            self.derive_altitude_when_auto();
        }
    }

    pub fn inputs(&self) -> GlideSlopeInputs {
        GlideSlopeInputs::new(
            self.glide_slope,
            self.horizontal_distance,
            self.altitude,
            self.altitude_unit,
            self.auto_mode,
        )
    }

    fn derive_altitude_when_auto(&mut self) {
        if self.auto_mode {
            self.altitude = glide_slope::derive_altitude(
                self.glide_slope(),
                self.horizontal_distance(),
                self.altitude_unit,
            );
            debug!(
                altitude = self.altitude,
                unit = %self.altitude_unit,
                "Derived altitude on the glide slope"
            );
        }
    }
}
impl Default for ApproachPanel {
    fn default() -> Self {
        Self::new()
    }
}
impl SimulationElement for ApproachPanel {
    fn read(&mut self, reader: &mut SimulatorReader) {
        self.set_glide_slope(reader.read_f64(Self::GLIDE_SLOPE_KEY));
        self.set_horizontal_distance(reader.read_f64(Self::HORIZONTAL_DISTANCE_KEY));
        self.set_auto_mode(reader.read_bool(Self::AUTO_MODE_KEY));

        // The altitude is expressed in the unit displayed before any unit switch.
        self.set_altitude(reader.read_f64(Self::ALTITUDE_KEY));

        let unit = reader.read_f64(Self::ALTITUDE_UNIT_KEY);
        match AltitudeUnit::from_f64(unit) {
            Some(unit) => self.set_altitude_unit(unit),
            None => warn!(unit, "Rejecting unknown altitude unit"),
        }
    }

    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_f64(Self::GLIDE_SLOPE_KEY, self.glide_slope);
        writer.write_f64(Self::HORIZONTAL_DISTANCE_KEY, self.horizontal_distance);
        writer.write_bool(Self::AUTO_MODE_KEY, self.auto_mode);
        writer.write_f64(Self::ALTITUDE_KEY, self.altitude);
        writer.write_f64(
            Self::ALTITUDE_UNIT_KEY,
            self.altitude_unit.to_f64().unwrap_or_default(),
        );
        writer.write_bool(Self::ALTITUDE_EDITABLE_KEY, self.altitude_is_editable());
    }
}

fn clamp(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.max(*range.start()).min(*range.end())
}

fn accept(input: &str, value: f64, range: &RangeInclusive<f64>) -> Option<f64> {
    if value.is_finite() {
        Some(clamp(value, range))
    } else {
        warn!(input, value, "Rejecting non-finite input");
        None
    }
}
