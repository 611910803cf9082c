use space_invaders::geometry::Rect;

#[test]
fn touching_edges_do_not_collide() {
    let a = Rect::new(0.0, 0.0, 5.0, 5.0);
    let b = Rect::new(5.0, 0.0, 5.0, 5.0);
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));

    let below = Rect::new(0.0, 5.0, 5.0, 5.0);
    assert!(!a.overlaps(&below));
}

#[test]
fn partial_overlap_collides() {
    let a = Rect::new(0.0, 0.0, 5.0, 5.0);
    let b = Rect::new(4.0, 0.0, 5.0, 5.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn overlap_needs_both_axes() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    // x overlaps, y doesn't
    assert!(!a.overlaps(&Rect::new(2.0, 20.0, 4.0, 4.0)));
    // y overlaps, x doesn't
    assert!(!a.overlaps(&Rect::new(20.0, 2.0, 4.0, 4.0)));
}

#[test]
fn containment_collides() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn overlap_is_symmetric() {
    let rects = [
        Rect::new(0.0, 0.0, 5.0, 5.0),
        Rect::new(4.0, 4.0, 5.0, 5.0),
        Rect::new(5.0, 0.0, 5.0, 5.0),
        Rect::new(-3.0, 2.0, 4.0, 1.0),
        Rect::new(2.0, -10.0, 1.0, 30.0),
    ];
    for a in &rects {
        for b in &rects {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
        }
    }
}
