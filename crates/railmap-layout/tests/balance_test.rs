use nalgebra::Vector2;
use railmap_layout::Body;
use railmap_layout::balance::{centered, centroid, recenter};

fn sample() -> Vec<Vector2<f64>> {
    vec![
        Vector2::new(12.5, -3.0),
        Vector2::new(-4.0, 8.25),
        Vector2::new(0.0, 0.0),
        Vector2::new(100.0, 42.0),
        Vector2::new(-7.75, -19.5),
    ]
}

#[test]
fn centered_points_have_zero_centroid() {
    let out = centered(&sample());
    let c = centroid(&out).unwrap();
    assert!(c.norm() < 1e-12, "centroid {c:?}");
}

#[test]
fn centered_preserves_pairwise_distances() {
    let before = sample();
    let after = centered(&before);
    for i in 0..before.len() {
        for j in 0..i {
            let d0 = (before[i] - before[j]).norm();
            let d1 = (after[i] - after[j]).norm();
            assert!((d0 - d1).abs() < 1e-12, "{i}-{j}: {d0} vs {d1}");
        }
    }
}

#[test]
fn recenter_moves_positions_only() {
    let mut bodies: Vec<Body> = sample().into_iter().map(Body::at).collect();
    bodies[0].velocity = Vector2::new(1.0, 2.0);
    bodies[0].acceleration = Vector2::new(3.0, 4.0);

    recenter(&mut bodies);

    let positions: Vec<Vector2<f64>> = bodies.iter().map(|b| b.position).collect();
    assert!(centroid(&positions).unwrap().norm() < 1e-12);
    assert_eq!(positions, centered(&sample()));
    assert_eq!(bodies[0].velocity, Vector2::new(1.0, 2.0));
    assert_eq!(bodies[0].acceleration, Vector2::new(3.0, 4.0));
}

#[test]
fn centered_single_point_lands_on_the_origin() {
    assert_eq!(
        centered(&[Vector2::new(5.0, -5.0)]),
        vec![Vector2::zeros()]
    );
    assert!(centered(&[]).is_empty());
}
