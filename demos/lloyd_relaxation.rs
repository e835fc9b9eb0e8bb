use rand::Rng;
use voronoi_fortune::boundingbox::BoundingBox;
use voronoi_fortune::geometry::Point;

fn main() {
    let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
    let mut rng = rand::thread_rng();
    let sites: Vec<Point> = (0..200)
        .map(|_| Point::new(rng.gen_range(0.0, 100.0), rng.gen_range(0.0, 100.0)))
        .collect();

    let relaxed = voronoi_fortune::lloyds_relaxation(&sites, bbox, 4);

    for p in &relaxed {
        println!("{:.3} {:.3}", p.x, p.y);
    }
}
