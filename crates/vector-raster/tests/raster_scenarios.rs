use tiny_skia::{Pixmap, Transform};
use vector_core::data::model::TintMode;
use vector_core::Target;
use vector_raster::{Bounds, ColorFilter, LayoutDirection, RasterConfig, VectorDrawable};

const TRIANGLE: &str = r##"{ "name": "triangle", "width": 24, "height": 24,
    "viewportWidth": 24, "viewportHeight": 24,
    "children": [ { "type": "path", "name": "body", "pathData": "M12,2 L22,22 L2,22 Z",
                    "fillColor": "#FFFF0000" } ] }"##;

const LEFT_HALF: &str = r##"{ "width": 20, "height": 10, "viewportWidth": 20, "viewportHeight": 10,
    "autoMirrored": true,
    "children": [ { "type": "path", "pathData": "M0 0 H10 V10 H0 Z", "fillColor": "#FF0000FF" } ] }"##;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let p = pixmap.pixel(x, y).unwrap();
    (p.red(), p.green(), p.blue(), p.alpha())
}

fn render(drawable: &mut VectorDrawable, width: u32, height: u32) -> Pixmap {
    let mut pixmap = Pixmap::new(width, height).unwrap();
    drawable.draw(
        &mut pixmap.as_mut(),
        Bounds::from_size(width as f32, height as f32),
        Transform::identity(),
    );
    pixmap
}

#[test]
fn test_triangle_at_double_size() {
    init_tracing();
    let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap();
    assert_eq!(drawable.intrinsic_size(), (24.0, 24.0));

    let pixmap = render(&mut drawable, 48, 48);
    assert_eq!(drawable.cache().size(), Some((48, 48)));
    // Interior of the triangle (apex 24,4; base y=44 from x=4 to x=44).
    assert_eq!(rgba(&pixmap, 24, 30), (255, 0, 0, 255));
    assert_eq!(rgba(&pixmap, 24, 10).3, 255);
    // Outside it.
    assert_eq!(rgba(&pixmap, 2, 2).3, 0);
    assert_eq!(rgba(&pixmap, 45, 10).3, 0);
    assert_eq!(rgba(&pixmap, 24, 46).3, 0);
}

#[test]
fn test_cache_hit_is_bit_identical() {
    init_tracing();
    let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap();

    let first = render(&mut drawable, 48, 48);
    let second = render(&mut drawable, 48, 48);
    assert_eq!(first.data(), second.data());

    let stats = drawable.cache_stats();
    assert_eq!(stats.renders, 1);
    assert_eq!(stats.hits, 1);

    // A write through the drawable forces a new traversal.
    let Some(Target::Node(body)) = drawable.resolve_target("body") else {
        panic!("body should resolve");
    };
    if let Some(path) = drawable.path_mut(body) {
        path.fill_color = 0xFF00FF00;
    }
    let third = render(&mut drawable, 48, 48);
    assert_eq!(drawable.cache_stats().renders, 2);
    assert_eq!(rgba(&third, 24, 30), (0, 255, 0, 255));
}

#[test]
fn test_degenerate_scale_paints_nothing() {
    init_tracing();
    let doc = r##"{ "width": 24, "height": 24, "viewportWidth": 24, "viewportHeight": 24,
        "children": [ { "type": "group", "scaleX": 0,
            "children": [ { "type": "path", "pathData": "M0 0 H24 V24 H0 Z", "fillColor": "#FF000000",
                            "strokeColor": "#FF000000", "strokeWidth": 2 } ] } ] }"##;
    let mut drawable = VectorDrawable::from_json(doc).unwrap();
    let pixmap = render(&mut drawable, 24, 24);
    assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
}

#[test]
fn test_zero_or_sub_pixel_bounds_draw_nothing() {
    let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap();
    let mut pixmap = Pixmap::new(8, 8).unwrap();
    drawable.draw(&mut pixmap.as_mut(), Bounds::from_size(0.0, 8.0), Transform::identity());
    drawable.draw(&mut pixmap.as_mut(), Bounds::from_size(0.5, 8.0), Transform::identity());
    assert_eq!(drawable.cache().size(), None);
    assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
}

#[test]
fn test_trim_wraparound_strokes_both_ends() {
    let doc = r##"{ "width": 100, "height": 10, "viewportWidth": 100, "viewportHeight": 10,
        "children": [ { "type": "path", "pathData": "M0 5 H100", "strokeColor": "#FF000000",
                        "strokeWidth": 4, "trimPathStart": 0.8, "trimPathEnd": 0.2 } ] }"##;
    let mut drawable = VectorDrawable::from_json(doc).unwrap();
    let pixmap = render(&mut drawable, 100, 10);
    assert_eq!(rgba(&pixmap, 10, 5).3, 255);
    assert_eq!(rgba(&pixmap, 50, 5).3, 0);
    assert_eq!(rgba(&pixmap, 90, 5).3, 255);
}

#[test]
fn test_root_alpha_applies_at_composite() {
    let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap();
    drawable.set_alpha(128);
    let pixmap = render(&mut drawable, 24, 24);
    let alpha = rgba(&pixmap, 12, 16).3;
    assert!((127..=129).contains(&alpha), "alpha was {alpha}");
}

#[test]
fn test_tint_and_explicit_filter() {
    let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap();
    drawable.set_tint(Some(0xFF2196F3));
    let pixmap = render(&mut drawable, 24, 24);
    assert_eq!(rgba(&pixmap, 12, 16), (0x21, 0x96, 0xF3, 255));
    assert_eq!(rgba(&pixmap, 1, 1).3, 0);

    // The explicit filter wins over the tint.
    drawable.set_color_filter(Some(ColorFilter::new(0xFF00FF00, TintMode::SrcIn)));
    let pixmap = render(&mut drawable, 24, 24);
    assert_eq!(rgba(&pixmap, 12, 16), (0, 255, 0, 255));
}

#[test]
fn test_auto_mirror_flips_in_rtl() {
    let mut drawable = VectorDrawable::from_json(LEFT_HALF).unwrap();
    let ltr = render(&mut drawable, 20, 10);
    assert_eq!(rgba(&ltr, 5, 5).3, 255);
    assert_eq!(rgba(&ltr, 15, 5).3, 0);

    drawable.set_layout_direction(LayoutDirection::Rtl);
    let rtl = render(&mut drawable, 20, 10);
    assert_eq!(rgba(&rtl, 5, 5).3, 0);
    assert_eq!(rgba(&rtl, 15, 5).3, 255);
}

#[test]
fn test_canvas_scale_and_cap() {
    let mut drawable =
        VectorDrawable::from_json(TRIANGLE).unwrap().with_config(RasterConfig {
            max_cached_bitmap_size: 32,
            anti_alias: true,
        });
    let mut pixmap = Pixmap::new(96, 96).unwrap();
    drawable.draw(
        &mut pixmap.as_mut(),
        Bounds::from_size(24.0, 24.0),
        Transform::from_scale(4.0, 4.0),
    );
    // 96x96 requested, clamped to the cap and stretched over the bounds.
    assert_eq!(drawable.cache().size(), Some((32, 32)));
    assert_eq!(rgba(&pixmap, 48, 60).3, 255);
    assert_eq!(rgba(&pixmap, 2, 2).3, 0);
}

#[test]
fn test_caching_disabled_rerenders_every_draw() {
    let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap();
    drawable.set_allow_caching(false);
    let first = render(&mut drawable, 24, 24);
    let second = render(&mut drawable, 24, 24);
    assert_eq!(first.data(), second.data());
    assert_eq!(drawable.cache_stats().renders, 2);
}

#[test]
fn test_stretched_bitmap_samples_alike_at_any_alpha() {
    let capped = RasterConfig {
        max_cached_bitmap_size: 16,
        anti_alias: true,
    };
    let draw_at = |alpha: u8| {
        let mut drawable = VectorDrawable::from_json(TRIANGLE).unwrap().with_config(capped.clone());
        drawable.set_alpha(alpha);
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        drawable.draw(
            &mut pixmap.as_mut(),
            Bounds::from_size(64.0, 64.0),
            Transform::identity(),
        );
        pixmap
    };

    let opaque = draw_at(255);
    let translucent = draw_at(254);
    for (a, b) in opaque.pixels().iter().zip(translucent.pixels()) {
        let expected = a.alpha() as f32 * 254.0 / 255.0;
        assert!(
            (b.alpha() as f32 - expected).abs() <= 2.0,
            "opaque {} vs translucent {}",
            a.alpha(),
            b.alpha()
        );
    }
}
