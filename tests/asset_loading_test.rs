use donut_scene::{
    SceneConfig,
    resources::{load_font, load_matcap, load_scene_assets},
};

#[tokio::test]
async fn should_load_bundled_font() {
    let font = load_font("fonts/blocky_regular.typeface.json").await.unwrap();
    assert_eq!(font.family_name(), "Blocky");
    for c in "Hello Three.js".chars() {
        assert!(font.glyph(c).is_some(), "missing glyph {:?}", c);
    }
}

#[tokio::test]
async fn should_load_bundled_matcap() {
    let matcap = load_matcap("textures/matcaps/1.png").await.unwrap();
    let (width, height) = matcap.dimensions();
    assert!(width > 0 && height > 0);
    assert_eq!(width, height);
}

#[tokio::test]
async fn should_load_both_assets_for_default_config() {
    let assets = load_scene_assets(&SceneConfig::default()).await.unwrap();
    assert_eq!(assets.font.family_name(), "Blocky");
    assert!(assets.matcap.dimensions().0 > 0);
}

#[tokio::test]
async fn should_fail_when_matcap_is_missing() {
    let config = SceneConfig {
        matcap_path: "textures/matcaps/does-not-exist.png".to_string(),
        ..SceneConfig::default()
    };
    assert!(load_scene_assets(&config).await.is_err());
}

#[tokio::test]
async fn should_fail_on_malformed_font() {
    let config = SceneConfig {
        // a PNG is not typeface JSON
        font_path: "textures/matcaps/1.png".to_string(),
        ..SceneConfig::default()
    };
    assert!(load_scene_assets(&config).await.is_err());
}
