use super::*;

fn res(h: u32, w: u32) -> Resolution {
    Resolution::new(h, w).unwrap()
}

#[test]
fn filled_frame_has_background_everywhere() {
    let f = FrameAccum::filled(res(2, 3), [10.0, 20.5, 30.0]);
    for row in 0..2 {
        for col in 0..3 {
            assert_eq!(f.pixel(row, col), [10.0, 20.5, 30.0]);
        }
    }
    let q = f.quantize();
    assert_eq!((q.width, q.height, q.data.len()), (3, 2, 18));
    assert_eq!(q.pixel(1, 2), [10, 20, 30]);
}

#[test]
fn quantize_clamps_out_of_range_values() {
    let mut f = FrameAccum::filled(res(1, 2), [0.0; 3]);
    f.pixel_mut(0, 0).copy_from_slice(&[-40.0, 300.0, 254.9]);
    let q = f.quantize();
    assert_eq!(q.pixel(0, 0), [0, 255, 254]);
}

#[test]
fn zero_sigma_noise_is_a_noop() {
    let mut f = FrameAccum::filled(res(4, 4), [100.0; 3]);
    let before = f.clone();
    f.add_gaussian_noise(&mut SceneRng::seed_from_u64(1), 0.0);
    assert_eq!(f, before);
}

#[test]
fn noise_perturbs_and_is_seed_deterministic() {
    let mut a = FrameAccum::filled(res(8, 8), [128.0; 3]);
    let mut b = a.clone();
    a.add_gaussian_noise(&mut SceneRng::seed_from_u64(9), 20.0);
    b.add_gaussian_noise(&mut SceneRng::seed_from_u64(9), 20.0);
    assert_eq!(a, b);
    assert_ne!(a, FrameAccum::filled(res(8, 8), [128.0; 3]));
}
