use crate::camera::FrameView;
use crate::render::{ParallaxPipeline, RenderCtx, RenderTarget};

use super::Object;

/// Ordered collection of scene objects plus the pipeline they share.
///
/// Objects are drawn in insertion order inside a single render pass that
/// clears both color and depth.
#[derive(Default)]
pub struct ObjectManager {
    objects: Vec<Object>,
    pipeline: Option<ParallaxPipeline>,
}

impl ObjectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object and returns its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn update_all(&mut self, frame: &FrameView) {
        for object in &mut self.objects {
            object.update(frame);
        }
    }

    /// Clears `target` to `clear` (depth to 1.0) and draws every object.
    pub fn render_all(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        clear: wgpu::Color,
    ) {
        let pipeline = self
            .pipeline
            .get_or_insert_with(|| ParallaxPipeline::new(ctx.device));
        pipeline.ensure_pipeline(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("parallax scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for object in &mut self.objects {
            object.render(ctx, pipeline, &mut rpass);
        }
    }

    /// Drops every object; the shared pipeline is kept.
    pub fn remove_all(&mut self) {
        log::debug!("removing {} objects", self.objects.len());
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Projection};

    #[test]
    fn add_returns_sequential_indices() {
        let mut m = ObjectManager::new();
        assert!(m.is_empty());
        assert_eq!(m.add_object(Object::new()), 0);
        assert_eq!(m.add_object(Object::new()), 1);
        assert_eq!(m.len(), 2);
        assert!(m.object(1).is_some());
        assert!(m.object(2).is_none());
    }

    #[test]
    fn object_mut_edits_in_place() {
        let mut m = ObjectManager::new();
        m.add_object(Object::new());
        if let Some(o) = m.object_mut(0) {
            o.set_depth_scale(0.2);
        }
        assert_eq!(m.object(0).map(|o| o.depth_scale()), Some(0.2));
    }

    #[test]
    fn update_all_reaches_every_object() {
        let mut m = ObjectManager::new();
        m.add_object(Object::new());
        m.add_object(Object::new());

        let frame = FrameView::new(&Camera::new(), &Projection::default(), 640, 480);
        m.update_all(&frame);

        assert!(m.iter().all(|o| o.uniforms().view == frame.view.to_cols_array_2d()));
    }

    #[test]
    fn remove_all_empties_the_list() {
        let mut m = ObjectManager::new();
        m.add_object(Object::new());
        m.remove_all();
        assert!(m.is_empty());
        assert!(m.object(0).is_none());
    }
}
