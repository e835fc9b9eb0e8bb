use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use voronoi_fortune::boundingbox::BoundingBox;
use voronoi_fortune::geometry::Point;

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Info))
}

fn main() {
    init().expect("failed to initialize logger");

    let sites = vec![
        Point::new(70.0, 50.0),
        Point::new(20.0, 20.0),
        Point::new(40.0, 30.0),
        Point::new(80.0, 90.0),
    ];
    let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);

    let diagram = voronoi_fortune::create_diagram(&sites, bbox, true);

    for cell in diagram.cells() {
        println!(
            "cell at ({:.2}, {:.2}): {} half-edges",
            cell.site().x,
            cell.site().y,
            cell.half_edges().len()
        );
    }
    println!("{} edges total", diagram.edges().count());
}
