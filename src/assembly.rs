//! Scene population.
//!
//! Builds the text and donut meshes from loaded assets and wires up the
//! camera, controls and debug panel. Randomness comes in through a
//! `rand::Rng` so tests can seed it.

use std::f32::consts::PI;
use std::sync::Arc;

use anyhow::ensure;
use cgmath::{Euler, Rad, Vector3};
use rand::Rng;

use crate::{
    app::SceneState,
    camera::PerspectiveCamera,
    config::SceneConfig,
    controls::OrbitControls,
    data_structures::{
        instance::Transform,
        material::{MatcapMaterial, MatcapTexture},
        scene_graph::{Mesh, Node, NodeId, Scene},
    },
    debug::DebugPanel,
    font::Font,
    geometry::{Geometry, text::centered_text, torus::torus},
    viewport::Viewport,
};

/// Everything that has to be loaded before the scene can be built.
#[derive(Clone, Debug)]
pub struct SceneAssets {
    pub font: Font,
    pub matcap: MatcapTexture,
}

/// Draw one donut placement.
///
/// Six uniform draws in order: position x, y, z (mapped to
/// `[-spread/2, spread/2)`), rotation x, y (mapped to `[0, π)`), then the
/// uniform scale. Rotation z stays zero.
pub fn random_donut_transform<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> Transform {
    let x = (rng.random::<f32>() - 0.5) * spread;
    let y = (rng.random::<f32>() - 0.5) * spread;
    let z = (rng.random::<f32>() - 0.5) * spread;
    let rotation_x = rng.random::<f32>() * PI;
    let rotation_y = rng.random::<f32>() * PI;
    let scale = rng.random::<f32>();

    Transform {
        position: Vector3::new(x, y, z),
        rotation: Euler::new(Rad(rotation_x), Rad(rotation_y), Rad(0.0)),
        scale: Vector3::new(scale, scale, scale),
    }
}

/// Add `count` donuts sharing `geometry` and `material`.
pub fn scatter_donuts<R: Rng + ?Sized>(
    scene: &mut Scene,
    geometry: &Arc<Geometry>,
    material: &Arc<MatcapMaterial>,
    count: usize,
    spread: f32,
    rng: &mut R,
) -> Vec<NodeId> {
    (0..count)
        .map(|_| {
            let mesh = Mesh::new("donut", geometry.clone(), material.clone())
                .with_transform(random_donut_transform(&mut *rng, spread));
            scene.add_mesh(mesh)
        })
        .collect()
}

/// Build the full scene: the text mesh first, then the donuts, then the camera.
pub fn assemble<R: Rng + ?Sized>(
    config: SceneConfig,
    assets: SceneAssets,
    viewport: Viewport,
    rng: &mut R,
) -> anyhow::Result<SceneState> {
    let (width, height) = assets.matcap.dimensions();
    ensure!(
        width > 0 && height > 0,
        "matcap texture {} is empty",
        assets.matcap.name()
    );
    let matcap = Arc::new(assets.matcap);
    let text_material = Arc::new(MatcapMaterial::new("text", matcap.clone()));
    let donut_material = Arc::new(MatcapMaterial::new("donut", matcap));

    let text = centered_text(&assets.font, &config.text);
    if text.geometry.vertex_count() == 0 {
        log::warn!(
            "text {:?} produced no geometry with font {}",
            config.text.content,
            assets.font.family_name()
        );
    }
    let text_offsets = [text.center_offset, text.max_offset];

    let mut scene = Scene::new();
    let text_id = scene.add_mesh(Mesh::new("text", Arc::new(text.geometry), text_material));

    let donut_geometry = Arc::new(torus(&config.torus));
    let donuts = scatter_donuts(
        &mut scene,
        &donut_geometry,
        &donut_material,
        config.donut_count,
        config.donut_spread,
        rng,
    );

    let camera = PerspectiveCamera::from_options(&config.camera, viewport.aspect());
    scene.add(Node::Camera);

    let controls = OrbitControls::with_damping(config.damping_factor);
    let debug = DebugPanel::new("Debug");

    log::info!(
        "scene assembled: {} nodes, {} donuts",
        scene.len(),
        donuts.len()
    );

    Ok(SceneState {
        config,
        viewport,
        scene,
        text: text_id,
        donuts,
        text_offsets,
        camera,
        controls,
        debug,
    })
}
