//! Provides all the necessary types for integrating the
//! crate into a host which exchanges named variables with it,
//! such as the user interface rendering the PAPI.


/// Trait for reading data from and writing data to the host.
pub trait SimulatorReaderWriter {
    /// Reads a variable with the given name from the host.
    fn read(&mut self, name: &str) -> f64;
    /// Writes a variable with the given name to the host.
    fn write(&mut self, name: &str, value: f64);
}

/// A scene is the root of the simulation. It is updated after the host's
/// data has been read into it and before its data is written to the host.
pub trait Scene: SimulationElement {
    fn update(&mut self);
}

/// Trait for an element within the simulation.
pub trait SimulationElement {
    /// Accepts a visitor, visiting the element itself and any elements it owns.
    fn accept<T: SimulationElementVisitor>(&mut self, visitor: &mut T)
    where
        Self: Sized,
    {
        visitor.visit(self);
    }

    /// Reads data representing the current state of the host into the element.
    fn read(&mut self, _reader: &mut SimulatorReader) {}

    /// Writes data from the element to the host.
    fn write(&self, _writer: &mut SimulatorWriter) {}
}

/// Trait for visitors that visit the simulation's elements.
pub trait SimulationElementVisitor {
    fn visit<T: SimulationElement>(&mut self, visited: &mut T);
}

/// Orchestrates the:
/// 1. Reading of data from the host into the scene.
/// 2. Updating of the scene.
/// 3. Writing of scene data to the host.
pub struct Simulation<T: Scene, U: SimulatorReaderWriter> {
    scene: T,
    reader_writer: U,
}
impl<T: Scene, U: SimulatorReaderWriter> Simulation<T, U> {
    pub fn new(scene: T, reader_writer: U) -> Self {
        Simulation {
            scene,
            reader_writer,
        }
    }

    pub fn tick(&mut self) {
        tick(&mut self.scene, &mut self.reader_writer);
    }

    pub fn scene(&self) -> &T {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut T {
        &mut self.scene
    }

    pub fn reader_writer_mut(&mut self) -> &mut U {
        &mut self.reader_writer
    }
}

pub(crate) fn tick<T: Scene, U: SimulatorReaderWriter>(scene: &mut T, reader_writer: &mut U) {
    let mut reader = SimulatorReader::new(reader_writer);
    let mut visitor = SimulatorToSimulationVisitor::new(&mut reader);
    scene.accept(&mut visitor);

    scene.update();

    let mut writer = SimulatorWriter::new(reader_writer);
    let mut visitor = SimulationToSimulatorVisitor::new(&mut writer);
    scene.accept(&mut visitor);
}

/// Visits simulation elements in order to pass data coming
/// from the host into the simulation.
struct SimulatorToSimulationVisitor<'a, 'b> {
    reader: &'a mut SimulatorReader<'b>,
}
impl<'a, 'b> SimulatorToSimulationVisitor<'a, 'b> {
    pub fn new(reader: &'a mut SimulatorReader<'b>) -> Self {
        SimulatorToSimulationVisitor { reader }
    }
}
impl SimulationElementVisitor for SimulatorToSimulationVisitor<'_, '_> {
    fn visit<T: SimulationElement>(&mut self, visited: &mut T) {
        visited.read(self.reader);
    }
}

/// Visits simulation elements in order to pass data from
/// the simulation to the host.
pub(crate) struct SimulationToSimulatorVisitor<'a, 'b> {
    writer: &'a mut SimulatorWriter<'b>,
}
impl<'a, 'b> SimulationToSimulatorVisitor<'a, 'b> {
    pub fn new(writer: &'a mut SimulatorWriter<'b>) -> Self {
        SimulationToSimulatorVisitor { writer }
    }
}
impl SimulationElementVisitor for SimulationToSimulatorVisitor<'_, '_> {
    fn visit<T: SimulationElement>(&mut self, visited: &mut T) {
        visited.write(self.writer);
    }
}

pub struct SimulatorReader<'a> {
    reader_writer: &'a mut dyn SimulatorReaderWriter,
}
impl<'a> SimulatorReader<'a> {
    pub fn new(reader_writer: &'a mut dyn SimulatorReaderWriter) -> Self {
        Self { reader_writer }
    }

    pub fn read_f64(&mut self, name: &str) -> f64 {
        self.reader_writer.read(name)
    }

    pub fn read_bool(&mut self, name: &str) -> bool {
        to_bool(self.reader_writer.read(name))
    }
}

pub struct SimulatorWriter<'a> {
    reader_writer: &'a mut dyn SimulatorReaderWriter,
}
impl<'a> SimulatorWriter<'a> {
    pub fn new(reader_writer: &'a mut dyn SimulatorReaderWriter) -> Self {
        Self { reader_writer }
    }

    pub fn write_f64(&mut self, name: &str, value: f64) {
        self.reader_writer.write(name, value);
    }

    pub fn write_bool(&mut self, name: &str, value: bool) {
        self.reader_writer.write(name, from_bool(value));
    }
}

/// Converts a given `f64` representing a boolean value in the host into an actual `bool` value.
pub fn to_bool(value: f64) -> bool {
    (value - 1.).abs() < f64::EPSILON
}

/// Converts a given `bool` value into an `f64` representing that boolean value in the host.
pub fn from_bool(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
