// Scene loading, parsing and validation, grounded on
// `petersallai-moonblokz-radio-simulator`'s `common::scene::{load_scene, validate_scene}`
// split: read the file, parse the JSON, then walk the result field-by-field before
// anything downstream trusts it. Adapted to the much smaller shape this simulator's
// node-placement file needs (no radio-channel physics, no obstacles).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use wsn_sim_protocol::NodePlacement;

#[derive(Debug, Deserialize)]
struct SceneNode {
    id: usize,
    x: f64,
    y: f64,
    #[serde(default = "default_tx_power")]
    tx_power: String,
    #[serde(default)]
    root_eligible: bool,
}

fn default_tx_power() -> String {
    "0 dBm".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

/// Loads and validates a scene file, returning placements in ascending `id` order.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Vec<NodePlacement>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file {}", path.display()))?;
    let scene: Scene = serde_json::from_str(&data)
        .with_context(|| format!("invalid scene JSON in {}", path.display()))?;
    validate_scene(&scene)?;

    let mut nodes = scene.nodes;
    nodes.sort_by_key(|n| n.id);
    Ok(nodes
        .into_iter()
        .map(|n| NodePlacement {
            position: (n.x, n.y),
            tx_power: n.tx_power,
            is_root_eligible: n.root_eligible,
        })
        .collect())
}

fn validate_scene(scene: &Scene) -> Result<()> {
    if scene.nodes.is_empty() {
        bail!("scene must contain at least one node");
    }

    let mut ids = HashSet::new();
    for node in &scene.nodes {
        if !ids.insert(node.id) {
            bail!("duplicate node id {} in scene", node.id);
        }
    }

    if !scene.nodes.iter().any(|n| n.root_eligible) {
        bail!("scene must mark at least one node as root_eligible");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_node_list() {
        let scene = Scene { nodes: vec![] };
        assert!(validate_scene(&scene).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let scene = Scene {
            nodes: vec![
                SceneNode {
                    id: 0,
                    x: 0.0,
                    y: 0.0,
                    tx_power: default_tx_power(),
                    root_eligible: true,
                },
                SceneNode {
                    id: 0,
                    x: 1.0,
                    y: 1.0,
                    tx_power: default_tx_power(),
                    root_eligible: false,
                },
            ],
        };
        assert!(validate_scene(&scene).is_err());
    }

    #[test]
    fn rejects_scene_with_no_root_eligible_node() {
        let scene = Scene {
            nodes: vec![SceneNode {
                id: 0,
                x: 0.0,
                y: 0.0,
                tx_power: default_tx_power(),
                root_eligible: false,
            }],
        };
        assert!(validate_scene(&scene).is_err());
    }

    #[test]
    fn accepts_well_formed_scene() {
        let scene = Scene {
            nodes: vec![
                SceneNode {
                    id: 1,
                    x: 0.0,
                    y: 0.0,
                    tx_power: default_tx_power(),
                    root_eligible: true,
                },
                SceneNode {
                    id: 0,
                    x: 5.0,
                    y: 5.0,
                    tx_power: default_tx_power(),
                    root_eligible: false,
                },
            ],
        };
        assert!(validate_scene(&scene).is_ok());
    }
}
