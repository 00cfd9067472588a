//! Scene rendering and draw batching.
//!
//! Meshes sharing both geometry and material (by `Arc` identity) are drawn
//! with one instanced call. Each distinct geometry and matcap image is
//! uploaded once; instance transforms are rewritten every frame.

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::{
    app::SceneState,
    camera::CameraUniform,
    context::Context,
    data_structures::{
        instance::InstanceRaw,
        mesh::{DrawMesh, GpuMesh},
        scene_graph::{NodeId, Scene},
        texture::Texture,
    },
    pipelines::matcap::{MatcapPipeline, matcap_bind_group, mk_matcap_pipeline},
};

/// Meshes drawn together: same geometry, same material.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawBatch {
    pub geometry: usize,
    pub material: usize,
    pub nodes: Vec<NodeId>,
}

fn ptr_key<T>(arc: &Arc<T>) -> usize {
    Arc::as_ptr(arc) as usize
}

/// Group the scene's meshes, keeping the order in which batches first appear.
pub fn plan_batches(scene: &Scene) -> Vec<DrawBatch> {
    let mut batches: Vec<DrawBatch> = Vec::new();
    let mut index: HashMap<(usize, usize), usize> = HashMap::new();
    for (id, mesh) in scene.mesh_entries() {
        let key = (ptr_key(&mesh.geometry), ptr_key(&mesh.material));
        let slot = *index.entry(key).or_insert_with(|| {
            batches.push(DrawBatch {
                geometry: key.0,
                material: key.1,
                nodes: Vec::new(),
            });
            batches.len() - 1
        });
        batches[slot].nodes.push(id);
    }
    batches
}

struct GpuBatch {
    plan: DrawBatch,
    instance_buffer: wgpu::Buffer,
}

pub struct Renderer {
    pipeline: MatcapPipeline,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    meshes: HashMap<usize, GpuMesh>,
    materials: HashMap<usize, wgpu::BindGroup>,
    batches: Vec<GpuBatch>,
    pub clear_colour: wgpu::Color,
}

impl Renderer {
    /// Upload the scene's geometries, matcaps and instance buffers.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        state: &SceneState,
    ) -> Self {
        let pipeline = mk_matcap_pipeline(device, color_format);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update(&state.camera);
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let mut meshes = HashMap::new();
        let mut textures: HashMap<usize, Texture> = HashMap::new();
        let mut materials = HashMap::new();
        for mesh in state.scene.meshes() {
            meshes
                .entry(ptr_key(&mesh.geometry))
                .or_insert_with(|| GpuMesh::new(device, &mesh.name, &mesh.geometry));
            let matcap = &mesh.material.matcap;
            let texture = textures
                .entry(ptr_key(matcap))
                .or_insert_with(|| Texture::from_matcap(device, queue, matcap));
            materials.entry(ptr_key(&mesh.material)).or_insert_with(|| {
                matcap_bind_group(
                    device,
                    &pipeline.material_layout,
                    texture,
                    &mesh.material.name,
                )
            });
        }

        let batches = plan_batches(&state.scene)
            .into_iter()
            .map(|plan| {
                let instances = instance_data(&state.scene, &plan.nodes);
                let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Instance Buffer"),
                    contents: bytemuck::cast_slice(&instances),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });
                GpuBatch {
                    plan,
                    instance_buffer,
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "renderer ready: {} geometries, {} textures, {} batches",
            meshes.len(),
            textures.len(),
            batches.len()
        );

        Self {
            pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            meshes,
            materials,
            batches,
            clear_colour: state.config.clear_colour,
        }
    }

    /// Write the camera and every instance transform to the GPU.
    pub fn update(&mut self, queue: &wgpu::Queue, state: &SceneState) {
        self.camera_uniform.update(&state.camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        for batch in &self.batches {
            let instances = instance_data(&state.scene, &batch.plan.nodes);
            queue.write_buffer(&batch.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
    }

    /// Record the scene into `view`, clearing colour and depth first.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_pipeline(&self.pipeline.pipeline);
        for batch in &self.batches {
            let (Some(mesh), Some(material)) = (
                self.meshes.get(&batch.plan.geometry),
                self.materials.get(&batch.plan.material),
            ) else {
                continue;
            };
            if mesh.num_elements == 0 || batch.plan.nodes.is_empty() {
                continue;
            }
            render_pass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
            render_pass.draw_mesh_instanced(
                mesh,
                material,
                &self.camera_bind_group,
                0..batch.plan.nodes.len() as u32,
            );
        }
    }

    /// Draw one frame to the window surface and present it.
    pub fn render(&mut self, ctx: &Context, state: &SceneState) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.update(&ctx.queue, state);
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.draw(&mut encoder, &view, &ctx.depth_texture.view);
        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn instance_data(scene: &Scene, nodes: &[NodeId]) -> Vec<InstanceRaw> {
    nodes
        .iter()
        .filter_map(|id| scene.mesh(*id))
        .map(|mesh| mesh.transform.to_raw())
        .collect()
}
