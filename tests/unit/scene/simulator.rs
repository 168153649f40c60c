use std::sync::Arc;

use image::RgbaImage;

use super::*;
use crate::{
    foundation::core::{BoundingBox, Resolution},
    sprite::motion::{MovementFn, ScaleFn},
};

fn templates() -> Vec<SpriteTemplate> {
    let mut img = RgbaImage::from_pixel(24, 16, image::Rgba([250, 40, 40, 255]));
    img.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
    vec![
        SpriteTemplate::with_mirrored("red", img),
        SpriteTemplate::new(
            "blue",
            RgbaImage::from_pixel(12, 12, image::Rgba([20, 20, 240, 200])),
        ),
    ]
}

fn small_config() -> SceneConfig {
    SceneConfig {
        resolution: Resolution::new(48, 64).unwrap(),
        fps: 10,
        average_sprite_count: 2.0,
        ..SceneConfig::default()
    }
}

fn quiet_config() -> SceneConfig {
    SceneConfig {
        background_component_drift: 0.0,
        background_brightness_drift: 0.0,
        background_noise_sigma: 0.0,
        overall_noise_sigma: 0.0,
        ..small_config()
    }
}

fn still_actor(kind: &str, color: [u8; 4], size: u32, at: [f64; 2]) -> SpriteActor {
    SpriteActor::new(
        kind,
        Arc::new(RgbaImage::from_pixel(size, size, image::Rgba(color))),
        Kinematics {
            initial_position: at,
            initial_scale: [1.0, 1.0],
            velocity: [0.0, 0.0],
            scale_speed: [0.0, 0.0],
            movement: MovementFn::Linear,
            scale: ScaleFn::Linear,
        },
        0.1,
        0.2,
    )
}

#[test]
fn spawn_probability_matches_linear_feedback() {
    assert_eq!(spawn_probability(0, 1.0), 0.5);
    assert!((spawn_probability(1, 1.0) - 0.2).abs() < 1e-12);
    assert!((spawn_probability(3, 3.0) - 0.2).abs() < 1e-12);
    assert!(spawn_probability(10, 1.0) < 0.0);
}

#[test]
fn construction_rejects_bad_inputs() {
    assert!(SceneSimulator::new(vec![], small_config(), 1).is_err());
    let bad_cfg = SceneConfig {
        fps: 0,
        ..small_config()
    };
    assert!(SceneSimulator::new(templates(), bad_cfg, 1).is_err());
    let empty = SpriteTemplate::new("ghost", RgbaImage::new(0, 0));
    assert!(SceneSimulator::new(vec![empty], small_config(), 1).is_err());
}

#[test]
fn frames_have_configured_size_and_clipped_labels() {
    let cfg = small_config();
    let res = cfg.resolution;
    let mut sim = SceneSimulator::new(templates(), cfg, 42).unwrap();
    for i in 0..200u64 {
        let out = sim.next_frame();
        assert_eq!(out.index, FrameIndex(i));
        assert_eq!(out.frame.resolution(), res);
        assert_eq!(out.frame.data.len(), res.pixel_count() * 3);
        for label in &out.labels {
            assert!(label.bbox.fits_within(res), "{label:?}");
        }
        assert!(sim.population() <= sim.peak_population());
    }
    assert!(sim.peak_population() > 0);
}

#[test]
fn same_seed_is_byte_identical() {
    let mut a = SceneSimulator::new(templates(), small_config(), 7).unwrap();
    let mut b = SceneSimulator::new(templates(), small_config(), 7).unwrap();
    for _ in 0..60 {
        assert_eq!(a.produce_next_frame(), b.produce_next_frame());
    }
    let mut c = SceneSimulator::new(templates(), small_config(), 8).unwrap();
    let differs = (0..10).any(|_| a.produce_next_frame() != c.produce_next_frame());
    assert!(differs);
}

#[test]
fn background_stays_in_range_over_long_runs() {
    let cfg = SceneConfig {
        resolution: Resolution::new(2, 2).unwrap(),
        background_component_drift: 2000.0,
        background_brightness_drift: 4000.0,
        ..small_config()
    };
    let mut sim = SceneSimulator::new(templates(), cfg, 3).unwrap();
    for _ in 0..2000 {
        sim.produce_next_frame();
        assert!(
            sim.background_color()
                .iter()
                .all(|c| (0.0..=255.0).contains(c))
        );
    }
}

#[test]
fn labels_are_newest_first_and_older_sprites_paint_on_top() {
    let mut sim = SceneSimulator::new(templates(), quiet_config(), 1).unwrap();
    sim.insert_actor(still_actor("old", [255, 0, 0, 255], 10, [5.0, 5.0]));
    sim.insert_actor(still_actor("new", [0, 0, 255, 255], 10, [10.0, 10.0]));
    // crowd the scene so no spawn can happen: p = 0.5 - 0.15 * n
    for _ in 0..4 {
        sim.insert_actor(still_actor("far", [0, 255, 0, 255], 2, [46.0, 62.0]));
    }

    let (frame, labels) = sim.produce_next_frame();
    assert_eq!(sim.population(), 6);
    let kinds: Vec<&str> = labels.iter().map(|l| l.kind.as_str()).collect();
    assert_eq!(kinds, ["far", "far", "far", "far", "new", "old"]);
    assert_eq!(
        labels[4].bbox,
        BoundingBox {
            top: 10,
            bottom: 20,
            left: 10,
            right: 20,
        }
    );
    // overlap region (10..15, 10..15): "old" is drawn last, so it wins
    assert_eq!(frame.pixel(12, 12), [255, 0, 0]);
    assert_eq!(frame.pixel(17, 17), [0, 0, 255]);
}

#[test]
fn offscreen_actor_is_removed_and_never_returns() {
    let mut sim = SceneSimulator::new(templates(), quiet_config(), 1).unwrap();
    let base = still_actor("leaving", [255, 255, 255, 255], 4, [0.0, 0.0]);
    let leaving = SpriteActor::new(
        "leaving",
        Arc::new(RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]))),
        Kinematics {
            velocity: [0.0, -100.0],
            ..*base.kinematics()
        },
        0.1,
        0.2,
    );
    sim.insert_actor(leaving);
    for _ in 0..4 {
        sim.insert_actor(still_actor("stay", [0, 0, 0, 255], 2, [20.0, 20.0]));
    }

    let (_, labels) = sim.produce_next_frame();
    // one tick at -100 px/s moves it 10 columns left: cols -10..-6
    assert!(labels.iter().all(|l| l.kind != "leaving"));
    assert!(sim.active_sprites().iter().all(|a| a.kind() != "leaving"));
    for _ in 0..20 {
        let (_, labels) = sim.produce_next_frame();
        assert!(labels.iter().all(|l| l.kind != "leaving"));
    }
}

#[test]
fn quiet_scene_without_sprites_is_flat_background() {
    let cfg = SceneConfig {
        average_sprite_count: 0.5,
        ..quiet_config()
    };
    let mut sim = SceneSimulator::new(templates(), cfg, 9).unwrap();
    let bg = sim.background_color();
    // scripted crowd far off-screen never renders, but keeps spawn probability negative
    for _ in 0..3 {
        sim.insert_actor(still_actor("gone", [0, 0, 0, 255], 2, [500.0, 500.0]));
    }
    let (frame, labels) = sim.produce_next_frame();
    assert!(labels.is_empty());
    assert_eq!(sim.population(), 0);
    let expect = bg.map(|c| (c as f32) as u8);
    assert_eq!(frame.pixel(0, 0), expect);
    assert_eq!(frame.pixel(47, 63), expect);
}

fn spawn_many(sim: &mut SceneSimulator, n: usize) -> Vec<SpriteActor> {
    (0..n).map(|_| sim.spawn_actor()).collect()
}

#[test]
fn spawned_sprites_follow_sampling_rules_without_shearing() {
    let cfg = small_config();
    let (frame_h, frame_w) = (
        f64::from(cfg.resolution.height),
        f64::from(cfg.resolution.width),
    );
    let mut sim = SceneSimulator::new(templates(), cfg, 5).unwrap();
    let actors = spawn_many(&mut sim, 3000);

    let mut shrinking = 0;
    let mut variant_hits = std::collections::HashMap::new();
    for actor in &actors {
        let k = actor.kinematics();
        assert_eq!(k.initial_scale[0], k.initial_scale[1]);
        assert!((0.2..=0.8).contains(&k.initial_scale[0]), "{k:?}");
        assert_eq!(k.scale_speed[0], k.scale_speed[1]);
        if k.scale_speed[0] < 0.0 {
            shrinking += 1;
        }
        assert_eq!((k.movement, k.scale), (MovementFn::Linear, ScaleFn::Linear));

        let img = actor.image();
        let half_h = f64::from(img.height()) / 2.0;
        let half_w = f64::from(img.width()) / 2.0;
        let [row, col] = k.initial_position;
        assert!(row >= -half_h && row < frame_h - half_h, "row {row}");
        assert!(col >= -half_w && col < frame_w - half_w, "col {col}");

        let template = sim
            .templates()
            .iter()
            .find(|t| t.kind() == actor.kind())
            .unwrap();
        let variant = template
            .variants()
            .iter()
            .position(|v| Arc::ptr_eq(v, img))
            .unwrap();
        *variant_hits
            .entry((actor.kind().to_string(), variant))
            .or_insert(0) += 1;
    }

    // sign flip on every other spawn, give or take; unflipped speeds are mostly positive
    assert!((1200..=1800).contains(&shrinking), "shrinking {shrinking}");
    // red (original + mirrored) and blue, each picked a fair share of the time
    assert_eq!(variant_hits.len(), 3);
    assert!((1200..=1800).contains(&variant_hits[&("blue".to_string(), 0)]));
    for v in 0..2 {
        let n = variant_hits[&("red".to_string(), v)];
        assert!((550..=950).contains(&n), "red variant {v}: {n}");
    }
}

#[test]
fn shearing_samples_each_axis_and_allows_full_scale() {
    let cfg = SceneConfig {
        allow_sprite_shearing: true,
        ..small_config()
    };
    let mut sim = SceneSimulator::new(templates(), cfg, 5).unwrap();
    let actors = spawn_many(&mut sim, 3000);

    let mut sheared = 0;
    let mut above_unsheared_cap = 0;
    let mut both_shrinking = 0;
    for actor in &actors {
        let k = actor.kinematics();
        for s in k.initial_scale {
            assert!((0.2..=1.0).contains(&s), "{k:?}");
            if s > 0.8 {
                above_unsheared_cap += 1;
            }
        }
        if k.initial_scale[0] != k.initial_scale[1] {
            sheared += 1;
        }
        if k.scale_speed[0] < 0.0 && k.scale_speed[1] < 0.0 {
            both_shrinking += 1;
        }
    }
    assert!(sheared > 2900, "sheared {sheared}");
    assert!(above_unsheared_cap > 1000, "above 0.8: {above_unsheared_cap}");
    assert!((1200..=1800).contains(&both_shrinking), "{both_shrinking}");
}

#[test]
fn custom_palette_drives_spawned_strategies() {
    let still = StrategyPalette::new(vec![MovementFn::Stationary], vec![ScaleFn::Constant]).unwrap();
    let mut sim = SceneSimulator::new(templates(), quiet_config(), 2)
        .unwrap()
        .with_palette(still);
    for actor in spawn_many(&mut sim, 50) {
        let k = actor.kinematics();
        assert_eq!((k.movement, k.scale), (MovementFn::Stationary, ScaleFn::Constant));
    }

    // stationary sprites keep their spawn place and size however long they live
    for _ in 0..40 {
        sim.produce_next_frame();
    }
    assert!(sim.population() > 0);
    for actor in sim.active_sprites() {
        let k = actor.kinematics();
        assert_eq!(actor.position(), k.initial_position);
        assert_eq!(actor.scale(), k.initial_scale);
    }

    let mixed = StrategyPalette::new(MovementFn::ALL.to_vec(), ScaleFn::ALL.to_vec()).unwrap();
    let mut sim = SceneSimulator::new(templates(), small_config(), 2)
        .unwrap()
        .with_palette(mixed);
    let actors = spawn_many(&mut sim, 200);
    for m in MovementFn::ALL {
        assert!(actors.iter().any(|a| a.kinematics().movement == *m));
    }
    for s in ScaleFn::ALL {
        assert!(actors.iter().any(|a| a.kinematics().scale == *s));
    }
}
