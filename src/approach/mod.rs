use crate::{
    error::Result,
    panel::{ApproachPanel, ApproachPanelLimits},
    papi::PrecisionApproachPathIndicator,
    simulation::{Scene, SimulationElement, SimulationElementVisitor},
};

/// An aircraft on final approach towards a runway equipped with a PAPI.
pub struct ApproachScene {
    panel: ApproachPanel,
    papi: PrecisionApproachPathIndicator,
}
impl ApproachScene {
    pub fn new() -> Self {
        Self::with_panel(ApproachPanel::new())
    }

    pub fn with_limits(limits: ApproachPanelLimits) -> Result<Self> {
        Ok(Self::with_panel(ApproachPanel::with_limits(limits)?))
    }

    fn with_panel(panel: ApproachPanel) -> Self {
        let mut scene = ApproachScene {
            panel,
            papi: PrecisionApproachPathIndicator::new(),
        };
        scene.update();

        scene
    }

    pub fn panel(&self) -> &ApproachPanel {
        &self.panel
    }

    /// Changes made through the panel are reflected by the PAPI after the next update.
    pub fn panel_mut(&mut self) -> &mut ApproachPanel {
        &mut self.panel
    }

    pub fn papi(&self) -> &PrecisionApproachPathIndicator {
        &self.papi
    }
}
impl Default for ApproachScene {
    fn default() -> Self {
        Self::new()
    }
}
impl Scene for ApproachScene {
    fn update(&mut self) {
        self.papi.update(&self.panel);
    }
}
impl SimulationElement for ApproachScene {
    fn accept<T: SimulationElementVisitor>(&mut self, visitor: &mut T) {
        self.panel.accept(visitor);
        self.papi.accept(visitor);
        visitor.visit(self);
    }
}

#[cfg(test)]
mod approach_scene_tests {
    use super::*;
    use crate::{
        error::PapiError,
        papi::PapiPattern,
        shared::AltitudeUnit,
        simulation::{
            test::{SimulationTestBed, TestReaderWriter},
            Simulation, SimulatorReaderWriter,
        },
    };
    use ntest::assert_about_eq;

    struct ApproachSceneTestBed {
        scene: ApproachScene,
        test_bed: SimulationTestBed,
    }
    impl ApproachSceneTestBed {
        fn new() -> Self {
            Self::with_scene(ApproachScene::new())
        }

        fn with_limits(limits: ApproachPanelLimits) -> Self {
            Self::with_scene(ApproachScene::with_limits(limits).unwrap())
        }

        fn with_scene(mut scene: ApproachScene) -> Self {
            let test_bed = SimulationTestBed::seeded_with(&mut scene);

            Self { scene, test_bed }
        }

        fn and(self) -> Self {
            self
        }

        fn glide_slope(mut self, degrees: f64) -> Self {
            self.test_bed
                .write_f64(ApproachPanel::GLIDE_SLOPE_KEY, degrees);
            self
        }

        fn horizontal_distance(mut self, nautical_miles: f64) -> Self {
            self.test_bed
                .write_f64(ApproachPanel::HORIZONTAL_DISTANCE_KEY, nautical_miles);
            self
        }

        fn altitude(mut self, altitude: f64) -> Self {
            self.test_bed.write_f64(ApproachPanel::ALTITUDE_KEY, altitude);
            self
        }

        fn altitude_unit(mut self, unit: AltitudeUnit) -> Self {
            self.test_bed
                .write_f64(ApproachPanel::ALTITUDE_UNIT_KEY, unit as u8 as f64);
            self
        }

        fn auto_mode(mut self, auto_mode: bool) -> Self {
            self.test_bed
                .write_bool(ApproachPanel::AUTO_MODE_KEY, auto_mode);
            self
        }

        fn run(mut self) -> Self {
            self.test_bed.run(&mut self.scene);
            self
        }

        fn altitude_written(&mut self) -> f64 {
            self.test_bed.read_f64(ApproachPanel::ALTITUDE_KEY)
        }

        fn lamp_is_white(&mut self, lamp: usize) -> bool {
            self.test_bed
                .read_bool(&PrecisionApproachPathIndicator::lamp_key(lamp))
        }

        fn white_lamp_count(&mut self) -> f64 {
            self.test_bed
                .read_f64(PrecisionApproachPathIndicator::WHITE_LAMP_COUNT_KEY)
        }

        fn altitude_is_editable(&mut self) -> bool {
            self.test_bed.read_bool(ApproachPanel::ALTITUDE_EDITABLE_KEY)
        }

        fn pattern(&self) -> Option<PapiPattern> {
            self.scene.papi().pattern()
        }
    }

    fn test_bed() -> ApproachSceneTestBed {
        ApproachSceneTestBed::new()
    }

    fn test_bed_with() -> ApproachSceneTestBed {
        test_bed()
    }

    #[test]
    fn new_scene_is_on_glide_path() {
        let scene = ApproachScene::new();

        assert_eq!(scene.papi().pattern(), Some(PapiPattern::OnGlidePath));
    }

    #[test]
    fn seeded_host_sees_the_default_approach() {
        let mut test_bed = test_bed();

        assert_about_eq!(test_bed.altitude_written(), 1592.);
        assert!(!test_bed.altitude_is_editable());
        assert_about_eq!(test_bed.white_lamp_count(), 2.);
    }

    #[test]
    fn ticking_without_changes_keeps_the_approach() {
        let mut test_bed = test_bed().run().run();

        assert_about_eq!(test_bed.altitude_written(), 1592.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::OnGlidePath));
    }

    #[test]
    fn doubling_distance_in_auto_mode_doubles_altitude_and_stays_on_glide_path() {
        let mut test_bed = test_bed_with().horizontal_distance(10.).run();

        assert_about_eq!(test_bed.altitude_written(), 3184.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::OnGlidePath));
        assert!(!test_bed.lamp_is_white(0));
        assert!(!test_bed.lamp_is_white(1));
        assert!(test_bed.lamp_is_white(2));
        assert!(test_bed.lamp_is_white(3));
    }

    #[test]
    fn manual_altitude_well_above_the_glide_slope_shows_all_white() {
        let mut test_bed = test_bed_with().auto_mode(false).and().altitude(2500.).run();

        assert!(test_bed.altitude_is_editable());
        assert_about_eq!(test_bed.white_lamp_count(), 4.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::FarAbove));
    }

    #[test]
    fn manual_altitude_is_ignored_while_in_auto_mode() {
        let mut test_bed = test_bed_with().altitude(2500.).run();

        assert_about_eq!(test_bed.altitude_written(), 1592.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::OnGlidePath));
    }

    #[test]
    fn unit_switch_converts_the_displayed_altitude() {
        let mut test_bed = test_bed_with()
            .auto_mode(false)
            .and()
            .altitude(2500.)
            .and()
            .altitude_unit(AltitudeUnit::Meters)
            .run();

        assert_about_eq!(test_bed.altitude_written(), 762.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::FarAbove));
    }

    #[test]
    fn unit_switch_in_auto_mode_derives_in_meters() {
        let mut test_bed = test_bed_with()
            .altitude_unit(AltitudeUnit::Meters)
            .run();

        assert_about_eq!(test_bed.altitude_written(), 485.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::OnGlidePath));
    }

    #[test]
    fn zero_distance_from_the_host_is_clamped() {
        let mut test_bed = test_bed_with().horizontal_distance(0.).run();

        assert_about_eq!(
            test_bed
                .test_bed
                .read_f64(ApproachPanel::HORIZONTAL_DISTANCE_KEY),
            1.
        );
        assert_eq!(test_bed.pattern(), Some(PapiPattern::OnGlidePath));
    }

    #[test]
    fn limits_reaching_zero_distance_are_rejected() {
        let scene = ApproachScene::with_limits(ApproachPanelLimits {
            horizontal_distance: 0.0..=10.0,
            ..ApproachPanelLimits::default()
        });

        assert!(matches!(
            scene,
            Err(PapiError::InvalidInput {
                name: "horizontal distance limit",
                ..
            })
        ));
    }

    #[test]
    fn shortest_distance_allowed_by_custom_limits_keeps_a_valid_indication() {
        let mut test_bed = ApproachSceneTestBed::with_limits(ApproachPanelLimits {
            horizontal_distance: 0.1..=10.0,
            ..ApproachPanelLimits::default()
        })
        .horizontal_distance(0.)
        .run();

        assert!(test_bed
            .test_bed
            .read_bool(PrecisionApproachPathIndicator::INDICATION_VALID_KEY));
        assert_about_eq!(test_bed.white_lamp_count(), 2.);
        assert_eq!(test_bed.pattern(), Some(PapiPattern::OnGlidePath));
    }

    #[test]
    fn steeper_glide_slope_with_manual_altitude_is_below() {
        let test_bed = test_bed_with()
            .auto_mode(false)
            .and()
            .glide_slope(3.5)
            .run();

        // 1592 ft at 5 NM is 3°, half a degree below 3.5°.
        assert_eq!(test_bed.pattern(), Some(PapiPattern::Below));
    }

    #[test]
    fn simulation_drives_the_scene_through_the_host() {
        let mut host = TestReaderWriter::new();
        host.write("PAPI_GLIDE_SLOPE", 3.);
        host.write("PAPI_HORIZONTAL_DISTANCE", 5.);
        host.write("PAPI_ALTITUDE", 500.);
        host.write("PAPI_AUTO_MODE", 0.);

        let mut simulation = Simulation::new(ApproachScene::new(), host);
        simulation.tick();

        assert_eq!(
            simulation.scene().papi().pattern(),
            Some(PapiPattern::FarBelow)
        );
        assert!(simulation
            .reader_writer_mut()
            .contains_bool("PAPI_LAMP_4_WHITE", false));
    }

    #[test]
    fn changes_made_directly_on_the_panel_show_after_update() {
        let mut scene = ApproachScene::new();
        scene.panel_mut().set_auto_mode(false);
        scene.panel_mut().set_altitude(2500.);

        assert_eq!(scene.papi().pattern(), Some(PapiPattern::OnGlidePath));

        scene.update();

        assert_eq!(scene.papi().pattern(), Some(PapiPattern::FarAbove));
    }
}
