use crate::{
    glide_slope::{self, GlideSlopeIndication, GlideSlopeInputs},
    panel::ApproachPanel,
    simulation::{SimulationElement, SimulatorWriter},
};
use num_derive::ToPrimitive;
use num_traits::ToPrimitive as _;
use std::fmt;
use tracing::{debug, warn};
use uom::si::{angle::degree, f64::*};

/// The deviation in degrees above which each lamp shows white, from the leftmost
/// lamp to the rightmost. Strictly decreasing, so a white lamp implies all lamps
/// to its right are white too.
pub const LAMP_THRESHOLDS: [f64; 4] = [1.0, 0.33, -0.33, -1.0];

/// The colour of each of the four lamps as seen from the aircraft.
/// Index 0 is the leftmost lamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PapiLights {
    white: [bool; 4],
}
impl PapiLights {
    pub fn from_deviation(deviation: Angle) -> Self {
        Self::from_deviation_degrees(deviation.get::<degree>())
    }

    pub fn from_deviation_degrees(degrees: f64) -> Self {
        let mut white = [false; 4];
        for (lamp, threshold) in white.iter_mut().zip(LAMP_THRESHOLDS.iter()) {
            *lamp = degrees > *threshold;
        }

        Self { white }
    }

    /// Lamps beyond the fourth are neither white nor red.
    pub fn is_white(&self, lamp: usize) -> bool {
        self.white.get(lamp).copied().unwrap_or(false)
    }

    pub fn is_red(&self, lamp: usize) -> bool {
        self.white.get(lamp).map_or(false, |white| !white)
    }

    pub fn white_count(&self) -> usize {
        self.white.iter().filter(|&&white| white).count()
    }

    pub fn as_array(&self) -> [bool; 4] {
        self.white
    }

    pub fn pattern(&self) -> PapiPattern {
        PapiPattern::from_white_count(self.white_count())
    }
}

/// The position relative to the glide path a pilot reads from the lights.
/// The discriminant equals the number of white lamps, which is how the pattern
/// is written to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ToPrimitive)]
pub enum PapiPattern {
    FarBelow = 0,
    Below = 1,
    OnGlidePath = 2,
    Above = 3,
    FarAbove = 4,
}
impl PapiPattern {
    /// Counts above four saturate at [`PapiPattern::FarAbove`], there being
    /// only four lamps.
    pub fn from_white_count(count: usize) -> Self {
        match count.min(LAMP_THRESHOLDS.len()) {
            0 => PapiPattern::FarBelow,
            1 => PapiPattern::Below,
            2 => PapiPattern::OnGlidePath,
            3 => PapiPattern::Above,
            _ => PapiPattern::FarAbove,
        }
    }

    pub fn white_count(self) -> usize {
        self as usize
    }

    pub fn red_count(self) -> usize {
        LAMP_THRESHOLDS.len() - self.white_count()
    }

    pub fn label(self) -> &'static str {
        match self {
            PapiPattern::FarBelow => "far below glide path",
            PapiPattern::Below => "below glide path",
            PapiPattern::OnGlidePath => "on glide path",
            PapiPattern::Above => "above glide path",
            PapiPattern::FarAbove => "far above glide path",
        }
    }

    /// A short code such as `2W/2R`.
    pub fn code(self) -> String {
        format!("{}W/{}R", self.white_count(), self.red_count())
    }
}
impl fmt::Display for PapiPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.label())
    }
}

/// The PAPI unit next to the runway. Holds the indication for the latest
/// state of the approach panel.
pub struct PrecisionApproachPathIndicator {
    indication: Option<GlideSlopeIndication>,
}
impl PrecisionApproachPathIndicator {
    pub const AIRCRAFT_ANGLE_KEY: &'static str = "PAPI_AIRCRAFT_ANGLE";
    pub const DEVIATION_KEY: &'static str = "PAPI_DEVIATION";
    pub const WHITE_LAMP_COUNT_KEY: &'static str = "PAPI_WHITE_LAMP_COUNT";
    pub const INDICATION_VALID_KEY: &'static str = "PAPI_INDICATION_VALID";
    pub const PATTERN_KEY: &'static str = "PAPI_PATTERN";

    pub fn new() -> Self {
        Self { indication: None }
    }

    pub fn update(&mut self, panel: &ApproachPanel) {
        self.evaluate(panel.inputs());
    }

    /// Evaluates the model for the given inputs. Holds no indication when the
    /// inputs are invalid.
    pub fn evaluate(&mut self, inputs: GlideSlopeInputs) {
        let previous_pattern = self.pattern();

        self.indication = match glide_slope::evaluate(inputs) {
            Ok(indication) => Some(indication),
            Err(error) => {
                warn!(%error, "PAPI indication unavailable");
                None
            }
        };

        if let Some(pattern) = self.pattern() {
            if previous_pattern != Some(pattern) {
                debug!(%pattern, "PAPI pattern changed");
            }
        }
    }

    pub fn indication(&self) -> Option<GlideSlopeIndication> {
        self.indication
    }

    pub fn lights(&self) -> Option<PapiLights> {
        self.indication.map(|indication| indication.lights())
    }

    pub fn pattern(&self) -> Option<PapiPattern> {
        self.indication.map(|indication| indication.pattern())
    }

    pub fn lamp_key(lamp: usize) -> String {
        format!("PAPI_LAMP_{}_WHITE", lamp + 1)
    }
}
impl Default for PrecisionApproachPathIndicator {
    fn default() -> Self {
        Self::new()
    }
}
impl SimulationElement for PrecisionApproachPathIndicator {
    /// Every variable is written on every tick. Without an indication the
    /// lamps are red and the angles read zero, next to an invalid flag.
    fn write(&self, writer: &mut SimulatorWriter) {
        writer.write_bool(Self::INDICATION_VALID_KEY, self.indication.is_some());

        let lights = self.lights();
        for lamp in 0..LAMP_THRESHOLDS.len() {
            writer.write_bool(
                &Self::lamp_key(lamp),
                lights.map_or(false, |lights| lights.is_white(lamp)),
            );
        }
        writer.write_f64(
            Self::WHITE_LAMP_COUNT_KEY,
            lights.map_or(0, |lights| lights.white_count()) as f64,
        );
        writer.write_f64(
            Self::PATTERN_KEY,
            self.pattern()
                .and_then(|pattern| pattern.to_f64())
                .unwrap_or_default(),
        );

        writer.write_f64(
            Self::AIRCRAFT_ANGLE_KEY,
            self.indication
                .map_or(0., |indication| indication.aircraft_angle().get::<degree>()),
        );
        writer.write_f64(
            Self::DEVIATION_KEY,
            self.indication
                .map_or(0., |indication| indication.deviation().get::<degree>()),
        );
    }
}
