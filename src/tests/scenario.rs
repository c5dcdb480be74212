use rstest::*;

use crate::{
    prelude::{
        intersect, locate, pixel_information, select_patches, Config, Error, Intersection, PatchSet,
        SpacecraftState, SurfacePatch, Vector3,
    },
    tests::{init_logger, reference_config, reference_epoch, reference_spacecraft, reference_sun},
};

#[fixture]
fn state() -> SpacecraftState {
    SpacecraftState::new(
        &reference_spacecraft(),
        reference_epoch(),
        &reference_config(),
        &reference_sun(),
    )
    .unwrap()
}

#[rstest]
fn nadir_camera_basis(state: SpacecraftState) {
    init_logger();

    let frame = state.camera;
    assert!((frame.right - Vector3::new(0.0, 1.0, 0.0)).norm() < 1.0E-12);
    assert!((frame.up - Vector3::new(0.0, 0.0, 1.0)).norm() < 1.0E-12);
    assert!(frame.direction[0] < 0.0);
    assert!(frame.direction[1].abs() < 1.0E-12);
    assert!(frame.direction[2].abs() < 1.0E-12);

    let ratio = frame.right.norm() / frame.direction.norm();
    assert!((ratio - 2.0 * 20.0_f64.to_radians().tan()).abs() < 1.0E-12);
}

#[rstest]
fn center_pixel_sees_sub_spacecraft_point(state: SpacecraftState) {
    init_logger();
    let cfg = reference_config();

    let pixel = pixel_information(&state, &cfg, 50, 50);
    assert!(pixel.exists);

    // pixel (50, 50) is half a pixel away from the optical axis
    assert!((pixel.lat_deg - 0.1516).abs() < 1.0E-3, "{:?}", pixel);
    assert!((pixel.lon_deg - 359.8484).abs() < 1.0E-3, "{:?}", pixel);

    let patch = locate(
        &state.position_m,
        &state.camera.ray(50, 50, &cfg.camera),
        cfg.body.radius_m,
    )
    .unwrap();

    assert_eq!(
        patch,
        SurfacePatch {
            lat_start: 0,
            lat_end: 5,
            lon_start: 355,
            lon_end: 360,
        }
    );
}

#[rstest]
fn optical_axis_distance(state: SpacecraftState) {
    let radius_m = reference_config().body.radius_m;
    match intersect(&state.position_m, &state.camera.direction, radius_m) {
        Intersection::Hit(p) => {
            let distance = (p - state.position_m).norm();
            assert!((distance - (3.0E6 - radius_m)).abs() < 1.0E-6);
        },
        other => panic!("unexpected intersection: {:?}", other),
    }
}

#[rstest]
#[case(40.0, true)]
#[case(90.0, false)]
fn corner_pixel(#[case] fov_deg: f64, #[case] visible: bool) {
    init_logger();

    let cfg = reference_config().with_fov(fov_deg);
    let state = SpacecraftState::new(
        &reference_spacecraft(),
        reference_epoch(),
        &cfg,
        &reference_sun(),
    )
    .unwrap();

    let pixel = pixel_information(&state, &cfg, 1, 1);
    assert_eq!(pixel.exists, visible);

    if visible {
        // top left corner: north west
        assert!((pixel.lat_deg - 17.142).abs() < 1.0E-2, "{:?}", pixel);
        assert!((pixel.lon_deg - 342.034).abs() < 1.0E-2, "{:?}", pixel);
    }
}

#[rstest]
fn surface_patch_selection(state: SpacecraftState) {
    init_logger();
    let cfg = reference_config();

    let patches = select_patches(&state, &cfg).unwrap();

    // corners reach ±17°, the body covers the whole image
    assert_eq!(patches.len(), 8 * 8);

    for patch in patches.iter() {
        assert!(patch.lat_start >= -20 && patch.lat_end <= 20, "{}", patch);
        assert!(patch.lon_start >= 340 || patch.lon_end <= 20, "{}", patch);
        assert!(patch.lon_start < 360);
        assert_eq!(patch.lat_end - patch.lat_start, 5);
        assert_eq!(patch.lon_end - patch.lon_start, 5);
    }

    // the sub-spacecraft point falls on the four patches around (0°, 0°)
    for (lat_start, lon_start) in [(0, 0), (-5, 0), (0, 355), (-5, 355)] {
        assert!(patches.contains(&SurfacePatch {
            lat_start,
            lat_end: lat_start + 5,
            lon_start,
            lon_end: lon_start + 5,
        }));
    }

    // same selection whatever the scanning order
    let reversed: PatchSet = patches.iter().rev().copied().collect();
    assert_eq!(reversed, patches);
}

#[rstest]
fn body_out_of_view(state: SpacecraftState) {
    init_logger();

    // looking away from the body
    let cfg = reference_config();
    let spacecraft = reference_spacecraft()
        .with_orientation(crate::prelude::Quaternion::from_axis_angle(
            &Vector3::new(0.0, 0.0, 1.0),
            std::f64::consts::PI,
        ));

    let away = SpacecraftState::new(&spacecraft, state.t, &cfg, &reference_sun()).unwrap();
    assert!(away.camera.direction[0] > 0.0);
    assert!(select_patches(&away, &cfg).unwrap().is_empty());
    assert!(!pixel_information(&away, &cfg, 50, 50).exists);
}

#[test]
fn wide_field_of_view() {
    // the whole visible hemisphere cap fits in a 90° image
    let cfg = Config::default().with_image_size(64, 64).with_fov(90.0);
    let state = SpacecraftState::new(
        &reference_spacecraft(),
        reference_epoch(),
        &cfg,
        &reference_sun(),
    )
    .unwrap();

    let patches = select_patches(&state, &cfg).unwrap();

    // horizon seen from 3000 km: ~54.6° central angle
    for patch in patches.iter() {
        assert!(patch.lat_start >= -60 && patch.lat_end <= 60, "{}", patch);
    }
    assert!(patches.len() > 8 * 8);
}

#[rstest]
fn patch_selection_rejects_invalid_config(state: SpacecraftState) {
    let cfg = reference_config();
    assert_eq!(
        select_patches(&state, &cfg.with_image_size(0, 10)),
        Err(Error::InvalidImageSize)
    );
    assert_eq!(
        select_patches(&state, &cfg.with_fov(180.0)),
        Err(Error::InvalidFieldOfView(180.0))
    );
}
