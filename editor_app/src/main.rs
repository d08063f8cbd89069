//! Headless scene editor session
//!
//! Loads the editor configuration, builds the starter scene, drives the
//! viewport through a short scripted session (orbit, zoom and two gizmo
//! drags), then saves the scene and loads it back to confirm the document.
//!
//! Usage: `scene_editor [config.toml|config.ron]`

use std::path::{Path, PathBuf};

use scene_engine::config::{Config, ConfigError, EditorConfig};
use scene_engine::ecs::components::TransformComponent;
use scene_engine::ecs::Entity;
use scene_engine::editor::{
    CameraInput, KeyCode, MouseButton, ScreenRect, ScriptedGizmo, ViewportFrame, ViewportInput, ViewportPanel,
};
use scene_engine::foundation::logging;
use scene_engine::foundation::math::{utils, Mat4, Vec3};
use scene_engine::foundation::time::FrameClock;
use scene_engine::render::HeadlessRenderer;
use scene_engine::scene::{populate_default_scene, IdentityPolicy, Scene, SceneSerializer, SerializerError};

const DEFAULT_CONFIG_PATH: &str = "editor.toml";

/// Errors that end the session
#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("scene error: {0}")]
    Scene(#[from] SerializerError),

    #[error("could not create scene directory '{path}': {source}")]
    SceneDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

struct EditorSession {
    config: EditorConfig,
    scene: Scene,
    selection: Option<Entity>,
    viewport: ViewportPanel,
    renderer: HeadlessRenderer,
    gizmo: ScriptedGizmo,
    clock: FrameClock,
}

impl EditorSession {
    fn new(config: EditorConfig) -> Self {
        let mut scene = Scene::from_settings(&config.scene);
        let cube = populate_default_scene(&mut scene);

        let viewport = ViewportPanel::from_config(&config);
        let (width, height) = viewport.size();
        let renderer = HeadlessRenderer::new(width, height);

        Self {
            config,
            scene,
            selection: Some(cube),
            viewport,
            renderer,
            gizmo: ScriptedGizmo::new(),
            clock: FrameClock::default(),
        }
    }

    fn panel_rect(&self) -> ScreenRect {
        ScreenRect::new(0.0, 0.0, self.config.camera.viewport_width, self.config.camera.viewport_height)
    }

    fn frame(&mut self, input: &ViewportInput) -> ViewportFrame {
        let delta_time = self.clock.tick();
        let frame = self.viewport.on_update(
            delta_time,
            input,
            &mut self.scene,
            self.selection,
            &mut self.renderer,
            &mut self.gizmo,
        );
        self.scene.on_update(delta_time);

        log::debug!(
            "Frame {}: camera_updated={} gizmo={:?} draw_calls={}",
            self.clock.frame_count(),
            frame.camera_updated,
            frame.gizmo,
            frame.stats.draw_calls
        );
        frame
    }

    /// Scripted interaction standing in for a UI host
    fn run(&mut self) {
        let rect = self.panel_rect();
        let center = rect.size() * 0.5;

        self.frame(&ViewportInput::active(rect, CameraInput::new()));

        // Orbit: first tick anchors the pointer, the second moves it
        let orbit = CameraInput::new().with_mouse_button(MouseButton::Right);
        self.frame(&ViewportInput::active(rect, orbit.clone().with_mouse_position(center.x, center.y)));
        self.frame(&ViewportInput::active(rect, orbit.with_mouse_position(center.x + 40.0, center.y + 15.0)));

        self.frame(&ViewportInput::active(rect, CameraInput::new().with_wheel(1.0)));
        log::info!(
            "Camera at {:?}, distance {:.2}",
            self.viewport.camera().position(),
            self.viewport.camera().distance()
        );

        self.gizmo.push_drag(Mat4::new_translation(&Vec3::new(1.0, 0.5, 0.0)));
        self.frame(&ViewportInput::active(rect, CameraInput::new()));

        self.gizmo
            .push_drag(Mat4::from_euler_angles(0.0, utils::deg_to_rad(30.0), 0.0));
        self.frame(&ViewportInput::active(rect, CameraInput::new()).with_key_press(KeyCode::E));

        self.frame(&ViewportInput::active(rect, CameraInput::new()));

        if let Some(transform) = self.selected_transform(&self.scene) {
            log::info!(
                "Selection after edits: translation {:?}, rotation {:?}, scale {:?}",
                transform.translation,
                transform.rotation,
                transform.scale
            );
        }
        log::info!(
            "Session ran {} frames ({} rendered)",
            self.clock.frame_count(),
            self.renderer.frame_count()
        );
    }

    fn selected_transform<'s>(&self, scene: &'s Scene) -> Option<&'s TransformComponent> {
        let entity = self.selection?;
        let tag = self.scene.entity(entity)?.tag();
        let entity = scene.find_entity_by_tag(tag)?;
        scene.entity(entity)?.try_component::<TransformComponent>()
    }

    /// Save the scene, load it into a fresh scene and compare the selection
    fn save_and_reload(&self) -> Result<(), AppError> {
        let path = Path::new(&self.config.scene.scene_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| AppError::SceneDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let serializer = SceneSerializer::new(IdentityPolicy::Preserve);
        serializer.serialize_to_file(&self.scene, path)?;

        let mut reloaded = Scene::from_settings(&self.config.scene);
        serializer.deserialize_from_file(&mut reloaded, path)?;

        if reloaded.entity_count() == self.scene.entity_count()
            && self.selected_transform(&reloaded) == self.selected_transform(&self.scene)
        {
            log::info!("Reloaded '{}' matches the edited scene", reloaded.name());
        } else {
            log::warn!(
                "Reloaded scene differs: {} entities saved, {} loaded",
                self.scene.entity_count(),
                reloaded.entity_count()
            );
        }
        Ok(())
    }
}

/// Configuration plus the reason defaults were used, if they were
///
/// The reason is reported by the caller once logging is up.
struct LoadedConfig {
    config: EditorConfig,
    fallback: Option<ConfigError>,
}

/// Load the config named on the command line, or the default path
///
/// An explicitly named file must load; a missing or broken default file falls
/// back to built-in defaults.
fn load_config(explicit: Option<&str>, default_path: &str) -> Result<LoadedConfig, AppError> {
    let loaded = match explicit {
        Some(path) => LoadedConfig {
            config: EditorConfig::load_from_file(path)?,
            fallback: None,
        },
        None => match EditorConfig::load_from_file(default_path) {
            Ok(config) => LoadedConfig { config, fallback: None },
            Err(e) => LoadedConfig {
                config: EditorConfig::default(),
                fallback: Some(e),
            },
        },
    };
    loaded.config.validate()?;
    Ok(loaded)
}

fn main() -> Result<(), AppError> {
    let explicit = std::env::args().nth(1);
    let loaded = load_config(explicit.as_deref(), DEFAULT_CONFIG_PATH);

    let log_level = loaded.as_ref().map_or("info", |loaded| loaded.config.log_level.as_str());
    logging::init_with_level(log_level);

    let config = match loaded {
        Ok(LoadedConfig { config, fallback }) => {
            if let Some(reason) = fallback {
                log::warn!("Using default configuration, could not load {}: {}", DEFAULT_CONFIG_PATH, reason);
            }
            config
        }
        Err(e) => {
            log::error!("Could not load configuration: {}", e);
            return Err(e);
        }
    };

    log::info!("Starting scene editor session for '{}'", config.scene.default_name);

    let mut session = EditorSession::new(config);
    session.run();

    match session.save_and_reload() {
        Ok(()) => {
            log::info!("Scene editor session finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Scene editor session failed: {}", e);
            Err(e)
        }
    }
}
