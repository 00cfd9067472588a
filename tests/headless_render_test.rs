#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
const SIZE: u32 = 256;

/// Render the assembled scene once into an offscreen texture and read it back.
#[cfg(feature = "integration-tests")]
fn render_offscreen(
    state: &donut_scene::SceneState,
    clear_colour: wgpu::Color,
) -> image::RgbaImage {
    use donut_scene::{
        context::{new_instance, request_device},
        data_structures::texture::Texture,
        render::Renderer,
    };

    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let instance = new_instance();
        let (_adapter, device, queue) = request_device(&instance, None).await.unwrap();

        let format = wgpu::TextureFormat::Rgba8UnormSrgb;
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen target"),
            size: wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = Texture::create_depth_texture(&device, [SIZE, SIZE], "offscreen depth");

        let mut renderer = Renderer::new(&device, &queue, format, state);
        renderer.clear_colour = clear_colour;
        renderer.update(&queue, state);

        let u32_size = std::mem::size_of::<u32>() as u32;
        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback"),
            size: (u32_size * SIZE * SIZE) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("offscreen encoder"),
        });
        renderer.draw(&mut encoder, &view, &depth.view);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(u32_size * SIZE),
                    rows_per_image: Some(SIZE),
                },
            },
            wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(Some(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).unwrap();
        });
        device.poll(wgpu::PollType::Wait).unwrap();
        rx.receive().await.unwrap().unwrap();

        let data = buffer_slice.get_mapped_range().to_vec();
        image::RgbaImage::from_raw(SIZE, SIZE, data).unwrap()
    })
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_render_text_and_donuts_over_clear_colour() {
    use crate::common::test_utils::seeded_scene;

    let mut state = seeded_scene(1);
    state.resize(SIZE as f64, SIZE as f64, 1.0);
    state.tick(0.0);

    let image = render_offscreen(&state, wgpu::Color::WHITE);
    let white = image::Rgba([255, 255, 255, 255]);
    let covered = image.pixels().filter(|p| **p != white).count();
    assert!(covered > 0, "nothing was drawn");
    assert!(covered < (SIZE * SIZE) as usize, "clear colour is not visible");
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_render_only_clear_colour_without_meshes() {
    use donut_scene::{SceneConfig, assembly::assemble, viewport::Viewport};
    use rand::{SeedableRng, rngs::StdRng};

    use crate::common::test_utils::fixture_assets;

    let config = SceneConfig {
        donut_count: 0,
        text: donut_scene::config::TextOptions {
            content: String::new(),
            ..Default::default()
        },
        ..SceneConfig::default()
    };
    let state = assemble(
        config,
        fixture_assets(),
        Viewport::new(SIZE as f64, SIZE as f64, 1.0, 2.0),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap();

    let image = render_offscreen(&state, wgpu::Color::WHITE);
    for pixel in image.pixels() {
        assert_eq!(*pixel, image::Rgba([255, 255, 255, 255]));
    }
}
