use std::path::{Path, PathBuf};

use parallax_engine::camera::Projection;
use parallax_engine::glam::Vec3;
use parallax_engine::scene::{DEFAULT_DEPTH_SCALE, DEFAULT_LIGHT_POSITION};

/// Environment variable that overrides [`DemoConfig::asset_dir`].
pub const ASSET_DIR_ENV: &str = "PARALLAX_ASSET_DIR";

/// Demo scene and control settings.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub asset_dir: PathBuf,
    pub diffuse_texture: String,
    pub normal_texture: String,
    pub depth_texture: String,

    /// Camera distance travelled per key press.
    pub camera_speed: f32,
    /// Depth-scale change per arrow key press.
    pub depth_scale_step: f32,
    pub initial_depth_scale: f32,

    pub clear_color: [f64; 4],
    pub projection: Projection,
    pub light_position: Vec3,

    pub wall_position: Vec3,
    pub wall_scale: Vec3,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            diffuse_texture: "bricks2.ppm".to_string(),
            normal_texture: "bricks2_normal.ppm".to_string(),
            depth_texture: "bricks2_disp.ppm".to_string(),
            camera_speed: 0.5,
            depth_scale_step: 0.01,
            initial_depth_scale: DEFAULT_DEPTH_SCALE,
            clear_color: [0.2, 0.2, 0.2, 1.0],
            projection: Projection::default(),
            light_position: DEFAULT_LIGHT_POSITION,
            wall_position: Vec3::new(0.0, 0.0, -8.0),
            wall_scale: Vec3::splat(2.0),
        }
    }
}

impl DemoConfig {
    /// Defaults plus the `PARALLAX_ASSET_DIR` override.
    pub fn from_env() -> Self {
        Self::default().with_asset_dir_override(std::env::var(ASSET_DIR_ENV).ok())
    }

    pub fn with_asset_dir_override(mut self, dir: Option<String>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
            self.asset_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        Path::new(&self.asset_dir).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_brick_wall_scene() {
        let c = DemoConfig::default();
        assert_eq!(c.camera_speed, 0.5);
        assert_eq!(c.depth_scale_step, 0.01);
        assert_eq!(c.initial_depth_scale, 0.05);
        assert_eq!(c.clear_color, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(c.wall_position, Vec3::new(0.0, 0.0, -8.0));
        assert_eq!(c.light_position, Vec3::new(0.0, -1.0, -7.0));
        assert_eq!(c.asset_path(&c.normal_texture), PathBuf::from("assets/bricks2_normal.ppm"));
    }

    #[test]
    fn asset_dir_override() {
        let c = DemoConfig::default().with_asset_dir_override(Some("/srv/textures".into()));
        assert_eq!(c.asset_dir, PathBuf::from("/srv/textures"));

        let c = DemoConfig::default().with_asset_dir_override(Some("  ".into()));
        assert_eq!(c.asset_dir, PathBuf::from("assets"));

        let c = DemoConfig::default().with_asset_dir_override(None);
        assert_eq!(c.asset_dir, PathBuf::from("assets"));
    }
}
