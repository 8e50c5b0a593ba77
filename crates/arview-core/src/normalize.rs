//! Asset framing: center a loaded scene at the origin and scale it so its
//! largest axis spans a fixed extent.
//!
//! The computation is pure. The owning surface applies the returned
//! transform and shadow flags to its own scene graph.

use crate::constants::{FALLBACK_EXTENT, TARGET_EXTENT};
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box; the identity for `union`.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Stable identifier the loader assigns to each scene node.
pub type NodeId = u32;

/// What the normalizer needs to know about one node of the loaded scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneNode {
    pub id: NodeId,
    /// World-space bounds for mesh-bearing nodes; `None` for groups, lights etc.
    pub bounds: Option<Aabb>,
}

/// Lighting flags to set on a mesh-bearing node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshShadowFlags {
    pub node: NodeId,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Result of framing an asset: apply `translation`, then `scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalization {
    pub center: Vec3,
    pub translation: Vec3,
    pub scale: f32,
    pub mesh_flags: SmallVec<[MeshShadowFlags; 8]>,
}

impl Normalization {
    /// Column-major matrix computing `scale * (p - center)`.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale)) * Mat4::from_translation(self.translation)
    }

    #[inline]
    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        (p + self.translation) * self.scale
    }
}

/// Frame the scene into a `TARGET_EXTENT` cube.
pub fn normalize(nodes: &[SceneNode]) -> Normalization {
    normalize_to(nodes, TARGET_EXTENT)
}

/// Frame the scene so its largest axis spans `target_extent`.
///
/// Empty, zero-volume or non-finite bounds fall back to an extent of
/// `FALLBACK_EXTENT` so the scale stays finite.
pub fn normalize_to(nodes: &[SceneNode], target_extent: f32) -> Normalization {
    let mut bounds = Aabb::EMPTY;
    let mut mesh_flags = SmallVec::new();
    for node in nodes {
        if let Some(b) = node.bounds {
            bounds = bounds.union(&b);
            mesh_flags.push(MeshShadowFlags {
                node: node.id,
                cast_shadow: true,
                receive_shadow: true,
            });
        }
    }

    let center = if bounds.is_empty() || !bounds.center().is_finite() {
        Vec3::ZERO
    } else {
        bounds.center()
    };
    let max_extent = if bounds.is_empty() {
        FALLBACK_EXTENT
    } else {
        let size = bounds.size();
        let m = size.x.max(size.y).max(size.z);
        if m.is_finite() && m > 0.0 {
            m
        } else {
            FALLBACK_EXTENT
        }
    };
    let target = if target_extent.is_finite() && target_extent > 0.0 {
        target_extent
    } else {
        TARGET_EXTENT
    };

    Normalization {
        center,
        translation: -center,
        scale: target / max_extent,
        mesh_flags,
    }
}

/// A loaded asset and its framing, computed once per load.
#[derive(Clone, Debug)]
pub struct ViewerAsset {
    source: String,
    normalization: Option<Normalization>,
}

impl ViewerAsset {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            normalization: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn normalization(&self) -> Option<&Normalization> {
        self.normalization.as_ref()
    }

    /// Normalize on first call; later calls return the cached framing.
    pub fn frame(&mut self, nodes: &[SceneNode], target_extent: f32) -> &Normalization {
        let source = &self.source;
        self.normalization.get_or_insert_with(|| {
            let n = normalize_to(nodes, target_extent);
            log::info!(
                "[asset] framed {} meshes={} center=({:.3},{:.3},{:.3}) scale={:.4}",
                source,
                n.mesh_flags.len(),
                n.center.x,
                n.center.y,
                n.center.z,
                n.scale
            );
            n
        })
    }

    /// A fresh load of the same source; the next `frame` normalizes again.
    pub fn reload(&mut self) {
        if self.normalization.take().is_some() {
            log::debug!("[asset] reloading {}", self.source);
        }
    }

    /// Point this holder at a new source, discarding the old framing.
    /// Returns `false` if the source is unchanged.
    pub fn replace(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if source == self.source {
            return false;
        }
        log::info!("[asset] replacing {} with {}", self.source, source);
        self.source = source;
        self.normalization = None;
        true
    }
}
