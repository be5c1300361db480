use anyhow::{Context, Result};
use glam::Vec3;
use handray_core::{EntityId, LayerMask, Transform};
use handray_interaction::{
    DragKind, FeedbackSettings, Highlight, HighlightColors, Interactable, LocomotionSettings,
    MenuSettings, RaycasterSettings, RotateSettings, Scene, Selectable, TranslateSettings,
};
use handray_physics::Collider;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/handray.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub raycaster: RaycasterSettings,
    pub translate: TranslateSettings,
    pub rotate: RotateSettings,
    pub feedback: FeedbackSettings,
    pub menu: MenuSettings,
    pub locomotion: LocomotionSettings,
    /// Scene content spawned under the world root.
    pub objects: Vec<ObjectConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            raycaster: RaycasterSettings::default(),
            translate: TranslateSettings::default(),
            rotate: RotateSettings::default(),
            feedback: FeedbackSettings::default(),
            menu: MenuSettings::default(),
            locomotion: LocomotionSettings::default(),
            objects: vec![
                ObjectConfig {
                    name: "ball".into(),
                    position: [0.0, 1.0, 3.0],
                    shape: ShapeConfig::Sphere { radius: 0.5 },
                    capability: DragKind::Translate,
                    ..ObjectConfig::default()
                },
                ObjectConfig {
                    name: "dial".into(),
                    position: [1.5, 1.0, 3.0],
                    shape: ShapeConfig::Box {
                        half_extents: [0.3, 0.3, 0.3],
                    },
                    capability: DragKind::Rotate,
                    ..ObjectConfig::default()
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObjectConfig {
    pub name: String,
    pub position: [f32; 3],
    pub shape: ShapeConfig,
    /// Raw layer bits the collider lives on.
    pub layers: u32,
    pub capability: DragKind,
    pub highlight: HighlightColors,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            name: "object".into(),
            position: [0.0, 1.0, 2.0],
            shape: ShapeConfig::Sphere { radius: 0.25 },
            layers: LayerMask::INTERACTABLE.bits(),
            capability: DragKind::None,
            highlight: HighlightColors::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Sphere { radius: f32 },
    Box { half_extents: [f32; 3] },
}

impl ObjectConfig {
    fn collider(&self) -> Result<Collider> {
        let layers = LayerMask::from_bits_truncate(self.layers);
        let collider = match self.shape {
            ShapeConfig::Sphere { radius } => Collider::sphere(radius, layers),
            ShapeConfig::Box { half_extents } => {
                Collider::cuboid(Vec3::from_array(half_extents), layers)
            }
        };
        collider.with_context(|| format!("invalid collider for object '{}'", self.name))
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                AppConfig::default()
            }
        }
    }

    /// Spawn every configured object into a fresh scene.
    pub fn build_scene(&self) -> Result<(Scene, Vec<(String, EntityId)>)> {
        let mut scene = Scene::new();
        let mut spawned = Vec::with_capacity(self.objects.len());

        for object in &self.objects {
            let name = object.name.clone();
            let selectable = Selectable::new().with_listener(move |event| {
                debug!(object = %name, ?event, "selectable notification");
            });
            let mut interactable = Interactable {
                selectable: Some(selectable),
                collider: Some(object.collider()?),
                ..Default::default()
            }
            .with_highlight(Highlight::new(object.highlight));
            if let Some(draggable) = object.capability.build(self.translate, self.rotate) {
                interactable = interactable.with_draggable(draggable);
            }

            let local = Transform::from_translation(Vec3::from_array(object.position));
            let id = scene
                .spawn(object.name.clone(), local, interactable)
                .with_context(|| format!("spawning object '{}'", object.name))?;
            spawned.push((object.name.clone(), id));
        }

        Ok((scene, spawned))
    }
}
