use vt_core_common::colors::{ColorKey, Palette};

#[test]
fn palette_round_trip_through_osc_style_index_lookup() {
    let mut palette = Palette::default();
    palette.set(200, (10, 20, 30));
    let key = ColorKey::index(200);
    assert_eq!(key.resolve(&palette), (10, 20, 30));
}

#[test]
fn direct_color_resolves_without_touching_the_palette() {
    let palette = Palette::default();
    let key = ColorKey::rgb(0xFF, 0x00, 0x80);
    assert_eq!(key.resolve(&palette), (0xFF, 0x00, 0x80));
}
