use beacon_core::color::Rgb;
use beacon_core::scene::{EntityId, SceneConfig, SceneVariant, TextureKind};
use beacon_core::texture::{mip_chain, mip_level_count, ImageSlot, TextureError, TextureImage};
use beacon_core::SceneRuntime;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 10, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn runtime(variant: SceneVariant) -> SceneRuntime {
    SceneRuntime::new(SceneConfig {
        variant,
        ..SceneConfig::default()
    })
}

fn material_of(rt: &SceneRuntime, id: EntityId) -> beacon_core::scene::Material {
    let entity = rt.scene().entity(id).unwrap();
    *rt.scene().material(entity.material).unwrap()
}

#[test]
fn decodes_png_with_full_mip_chain() {
    let image = TextureImage::decode(ImageSlot::Ground, &png_bytes(8, 4)).unwrap();
    assert_eq!((image.width(), image.height()), (8, 4));
    let sizes: Vec<(u32, u32)> = image.mips.iter().map(|m| (m.width(), m.height())).collect();
    assert_eq!(sizes, [(8, 4), (4, 2), (2, 1), (1, 1)]);
    let texel = image.mips[3].get_pixel(0, 0).0;
    for (got, want) in texel.iter().zip([200u8, 40, 10, 255]) {
        assert!(got.abs_diff(want) <= 1, "{:?}", texel);
    }
}

#[test]
fn rejects_bytes_that_are_not_an_image() {
    let err = TextureImage::decode(ImageSlot::Sphere, b"not an image").unwrap_err();
    assert!(matches!(err, TextureError::Decode(_)));
}

#[test]
fn mip_counts_follow_the_longer_side() {
    assert_eq!(mip_level_count(1, 1), 1);
    assert_eq!(mip_level_count(2048, 1024), 12);
    assert_eq!(mip_level_count(5, 3), 3);
    assert_eq!(mip_chain(RgbaImage::new(5, 3)).last().map(|m| m.dimensions()), Some((1, 1)));
}

#[test]
fn slot_paths_join_once() {
    assert_eq!(ImageSlot::Ground.path_in("assets/textures/"), "assets/textures/map.jpg");
    assert_eq!(ImageSlot::Background.path_in("../assets/textures"), "../assets/textures/space.jpg");
    assert_eq!(ImageSlot::Sphere.path_in(""), "Material_2077.jpg");
    assert!(ImageSlot::Sphere.has_normal_map());
    assert!(!ImageSlot::Ground.has_normal_map());
}

#[test]
fn materials_reference_their_images() {
    let rt = runtime(SceneVariant::Signage);
    let ground = material_of(&rt, EntityId::Ground);
    assert_eq!(ground.texture, Some(TextureKind::Image(ImageSlot::Ground)));
    assert_eq!(ground.normal_map, None);
    for id in [EntityId::PrimaryOrbiter, EntityId::SecondaryOrbiter] {
        let sphere = material_of(&rt, id);
        assert_eq!(sphere.texture, Some(TextureKind::Image(ImageSlot::Sphere)));
        assert_eq!(sphere.normal_map, Some(TextureKind::Image(ImageSlot::Sphere)));
        assert_eq!(sphere.uv_repeat.to_array(), [2.0, 2.0]);
    }
}

#[test]
fn images_attach_at_the_next_frame() {
    let mut rt = runtime(SceneVariant::Classic);
    assert_ne!(material_of(&rt, EntityId::Ground).color, Rgb::WHITE);

    let image = TextureImage::decode(ImageSlot::Ground, &png_bytes(4, 4)).unwrap();
    rt.image_sender().send(image).unwrap();
    assert!(rt.scene().images().is_empty());

    rt.frame(0.0);
    assert!(rt.scene().image(ImageSlot::Ground).is_some());
    assert_eq!(material_of(&rt, EntityId::Ground).color, Rgb::WHITE);
    assert_ne!(material_of(&rt, EntityId::PrimaryOrbiter).color, Rgb::WHITE);
}

#[test]
fn first_image_per_slot_wins() {
    let mut rt = runtime(SceneVariant::Classic);
    let sender = rt.image_sender();
    sender
        .send(TextureImage::decode(ImageSlot::Background, &png_bytes(4, 2)).unwrap())
        .unwrap();
    sender
        .send(TextureImage::decode(ImageSlot::Background, &png_bytes(8, 8)).unwrap())
        .unwrap();
    rt.frame(0.0);
    assert_eq!(rt.scene().images().len(), 1);
    assert_eq!(rt.scene().image(ImageSlot::Background).map(|i| i.width()), Some(4));
}

#[test]
fn missing_images_keep_the_fallback_look() {
    let mut rt = runtime(SceneVariant::Classic);
    drop(rt.image_sender());
    for i in 0..3 {
        rt.frame(i as f64 / 60.0);
    }
    assert!(rt.scene().images().is_empty());
    assert_eq!(material_of(&rt, EntityId::PrimaryOrbiter).color, Rgb::from_hex(0xb8c4d6));
}
