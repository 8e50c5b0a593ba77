use arview_core::{Aabb, Normalization, SceneNode, ViewerAsset, ViewerConfig};
use glam::Vec3;
use wasm_bindgen::prelude::*;

const FLOATS_PER_NODE: usize = 6;

/// Framing helper owned by the page's asset loader.
///
/// The loader passes mesh bounds as a flat array, six floats per mesh node
/// (`min.xyz`, `max.xyz`); the row index is the node id.
#[wasm_bindgen]
pub struct AssetFramer {
    asset: Option<ViewerAsset>,
    bounds: Vec<f32>,
    target_extent: f32,
}

#[wasm_bindgen]
impl AssetFramer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            asset: None,
            bounds: Vec::new(),
            target_extent: ViewerConfig::default().target_extent,
        }
    }

    /// Frame the asset loaded from `src`. Repeating a call with the same
    /// source and bounds returns the cached result; a new source, or new
    /// bounds for the same source (a reload), frames again.
    pub fn frame(&mut self, src: &str, bounds: &[f32]) -> NormalizedAsset {
        let asset = self.asset.get_or_insert_with(|| ViewerAsset::new(src));
        if !asset.replace(src) && self.bounds != bounds {
            asset.reload();
        }
        self.bounds.clear();
        self.bounds.extend_from_slice(bounds);
        let nodes = scene_nodes(bounds);
        NormalizedAsset::from(asset.frame(&nodes, self.target_extent))
    }

    /// Forget the current asset (viewer unmounted).
    pub fn clear(&mut self) {
        self.asset = None;
        self.bounds.clear();
    }
}

impl Default for AssetFramer {
    fn default() -> Self {
        Self::new()
    }
}

fn scene_nodes(bounds: &[f32]) -> Vec<SceneNode> {
    if bounds.len() % FLOATS_PER_NODE != 0 {
        log::warn!(
            "[asset] bounds length {} is not a multiple of {}; ignoring the tail",
            bounds.len(),
            FLOATS_PER_NODE
        );
    }
    bounds
        .chunks_exact(FLOATS_PER_NODE)
        .enumerate()
        .map(|(i, b)| SceneNode {
            id: i as u32,
            bounds: Some(Aabb::new(
                Vec3::new(b[0], b[1], b[2]),
                Vec3::new(b[3], b[4], b[5]),
            )),
        })
        .collect()
}

/// Framing result returned to JavaScript.
#[wasm_bindgen]
pub struct NormalizedAsset {
    translation: [f32; 3],
    scale: f32,
    matrix: [f32; 16],
    shadow_nodes: Vec<u32>,
}

#[wasm_bindgen]
impl NormalizedAsset {
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Vec<f32> {
        self.translation.to_vec()
    }

    /// Column-major 4x4 transform, ready for `Matrix4.fromArray`.
    pub fn matrix(&self) -> Vec<f32> {
        self.matrix.to_vec()
    }

    /// Ids of the nodes that should cast and receive shadows.
    pub fn shadow_nodes(&self) -> Vec<u32> {
        self.shadow_nodes.clone()
    }
}

impl From<&Normalization> for NormalizedAsset {
    fn from(n: &Normalization) -> Self {
        Self {
            translation: n.translation.to_array(),
            scale: n.scale,
            matrix: n.to_mat4().to_cols_array(),
            shadow_nodes: n
                .mesh_flags
                .iter()
                .filter(|f| f.cast_shadow || f.receive_shadow)
                .map(|f| f.node)
                .collect(),
        }
    }
}
