//! The global viewer context.
//!
//! All scene state (registry, options, extents) lives in one process-wide
//! [`Context`] behind a `OnceLock<RwLock<..>>`. Code accesses it through
//! [`with_context`]/[`with_context_mut`] closures so lock guards never
//! escape.

use std::sync::{OnceLock, RwLock};

use glam::Vec3;

use crate::error::{Result, SparseviewError};
use crate::options::Options;
use crate::registry::Registry;

static CONTEXT: OnceLock<RwLock<Context>> = OnceLock::new();

/// All viewer state: the structure registry, options, and scene extents.
pub struct Context {
    /// Whether sparseview has been initialized.
    pub initialized: bool,

    /// The structure registry.
    pub registry: Registry,

    /// Global options.
    pub options: Options,

    /// Representative length scale for all registered structures.
    pub length_scale: f32,

    /// Axis-aligned bounding box for all registered structures.
    pub bounding_box: (Vec3, Vec3),
}

impl Default for Context {
    fn default() -> Self {
        Self {
            initialized: false,
            registry: Registry::new(),
            options: Options::default(),
            length_scale: 1.0,
            bounding_box: (Vec3::ZERO, Vec3::ONE),
        }
    }
}

impl Context {
    /// Center of the scene bounding box.
    pub fn center(&self) -> Vec3 {
        (self.bounding_box.0 + self.bounding_box.1) * 0.5
    }

    /// Recomputes the bounding box and length scale from all registered
    /// structures.
    ///
    /// An empty scene keeps the unit defaults. A scene that collapses to a
    /// single point (one point, or all camera centers coincident) would give
    /// a zero length scale, which breaks camera framing and sizes markers to
    /// nothing, so the scale is floored to the unit default in that case.
    pub fn update_extents(&mut self) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut has_extent = false;

        for structure in self.registry.iter() {
            if let Some((bb_min, bb_max)) = structure.bounding_box() {
                min = min.min(bb_min);
                max = max.max(bb_max);
                has_extent = true;
            }
        }

        if !has_extent {
            self.bounding_box = (Vec3::ZERO, Vec3::ONE);
            self.length_scale = 1.0;
            return;
        }

        self.bounding_box = (min, max);
        let diagonal = (max - min).length();
        self.length_scale = if diagonal > f32::EPSILON { diagonal } else { 1.0 };
    }
}

/// Initializes the global context. Errors if called twice.
pub fn init_context() -> Result<()> {
    CONTEXT
        .set(RwLock::new(Context::default()))
        .map_err(|_| SparseviewError::AlreadyInitialized)?;

    with_context_mut(|ctx| {
        ctx.initialized = true;
    });

    Ok(())
}

/// Whether the context has been initialized (and not shut down).
pub fn is_initialized() -> bool {
    CONTEXT
        .get()
        .and_then(|lock| lock.read().ok())
        .is_some_and(|ctx| ctx.initialized)
}

/// Runs a closure with read access to the global context.
///
/// # Panics
///
/// Panics if sparseview has not been initialized.
pub fn with_context<F, R>(f: F) -> R
where
    F: FnOnce(&Context) -> R,
{
    let lock = CONTEXT.get().expect("sparseview not initialized");
    let guard = lock.read().expect("context lock poisoned");
    f(&guard)
}

/// Runs a closure with write access to the global context.
///
/// # Panics
///
/// Panics if sparseview has not been initialized.
pub fn with_context_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Context) -> R,
{
    let lock = CONTEXT.get().expect("sparseview not initialized");
    let mut guard = lock.write().expect("context lock poisoned");
    f(&mut guard)
}

/// Shuts down the global context, dropping all registered structures.
///
/// Due to `OnceLock` semantics the context cannot be re-initialized in the
/// same process.
pub fn shutdown_context() {
    if let Some(lock) = CONTEXT.get() {
        if let Ok(mut ctx) = lock.write() {
            ctx.initialized = false;
            ctx.registry.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Structure;
    use glam::Mat4;

    struct FixedBox {
        name: String,
        bbox: (Vec3, Vec3),
        transform: Mat4,
        enabled: bool,
    }

    impl FixedBox {
        fn boxed(name: &str, min: Vec3, max: Vec3) -> Box<dyn Structure> {
            Box::new(Self {
                name: name.to_string(),
                bbox: (min, max),
                transform: Mat4::IDENTITY,
                enabled: true,
            })
        }
    }

    impl Structure for FixedBox {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn type_name(&self) -> &'static str {
            "FixedBox"
        }
        fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
            Some(self.bbox)
        }
        fn length_scale(&self) -> f32 {
            (self.bbox.1 - self.bbox.0).length()
        }
        fn transform(&self) -> Mat4 {
            self.transform
        }
        fn set_transform(&mut self, transform: Mat4) {
            self.transform = transform;
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn refresh(&mut self) {}
    }

    #[test]
    fn extents_cover_all_structures() {
        let mut ctx = Context::default();
        ctx.registry
            .register(FixedBox::boxed("a", Vec3::ZERO, Vec3::ONE))
            .unwrap();
        ctx.registry
            .register(FixedBox::boxed("b", Vec3::splat(2.0), Vec3::splat(4.0)))
            .unwrap();
        ctx.update_extents();

        assert_eq!(ctx.bounding_box, (Vec3::ZERO, Vec3::splat(4.0)));
        assert!((ctx.length_scale - Vec3::splat(4.0).length()).abs() < 1e-5);
        assert_eq!(ctx.center(), Vec3::splat(2.0));
    }

    #[test]
    fn empty_scene_keeps_unit_defaults() {
        let mut ctx = Context::default();
        ctx.update_extents();
        assert_eq!(ctx.bounding_box, (Vec3::ZERO, Vec3::ONE));
        assert_eq!(ctx.length_scale, 1.0);
    }

    #[test]
    fn single_point_scene_keeps_nonzero_length_scale() {
        let p = Vec3::splat(2.0);
        let mut ctx = Context::default();
        ctx.registry.register(FixedBox::boxed("point", p, p)).unwrap();
        ctx.update_extents();

        assert_eq!(ctx.bounding_box, (p, p));
        assert_eq!(ctx.length_scale, 1.0);
    }
}
