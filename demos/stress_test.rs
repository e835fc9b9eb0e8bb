use rand::Rng;
use voronoi_fortune::boundingbox::BoundingBox;
use voronoi_fortune::geometry::Point;

fn main() {
    let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
    for _ in 0..1_000 {
        let mut rng = rand::thread_rng();
        let sites: Vec<Point> = (0..10_000)
            .map(|_| Point::new(rng.gen(), rng.gen()))
            .collect();

        voronoi_fortune::create_diagram(&sites, bbox, true);
    }
}
