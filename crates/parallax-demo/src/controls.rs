use parallax_engine::input::Key;
use parallax_engine::render::ShadingFlags;

/// Surface-detail presets selected with the number keys.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ShadingMode {
    /// Interpolated vertex normals only.
    Flat,
    #[default]
    NormalMapped,
    Parallax,
    ParallaxSelfShadowed,
}

impl ShadingMode {
    pub fn flags(self) -> ShadingFlags {
        let (normal_map, parallax_mapping, self_shadowing) = match self {
            ShadingMode::Flat => (false, false, false),
            ShadingMode::NormalMapped => (true, false, false),
            ShadingMode::Parallax => (true, true, false),
            ShadingMode::ParallaxSelfShadowed => (true, true, true),
        };
        ShadingFlags {
            normal_map,
            parallax_mapping,
            self_shadowing,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlAction {
    Quit,
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    IncreaseDepthScale,
    DecreaseDepthScale,
    SetShading(ShadingMode),
}

/// Fixed key bindings.
pub fn action_for_key(key: Key) -> Option<ControlAction> {
    use ControlAction::*;

    let action = match key {
        Key::Escape => Quit,
        Key::W => MoveForward,
        Key::S => MoveBackward,
        Key::A => MoveLeft,
        Key::D => MoveRight,
        Key::Q => MoveUp,
        Key::E => MoveDown,
        Key::ArrowUp => IncreaseDepthScale,
        Key::ArrowDown => DecreaseDepthScale,
        Key::Digit1 => SetShading(ShadingMode::Flat),
        Key::Digit2 => SetShading(ShadingMode::NormalMapped),
        Key::Digit3 => SetShading(ShadingMode::Parallax),
        Key::Digit4 => SetShading(ShadingMode::ParallaxSelfShadowed),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_select_shading() {
        assert_eq!(
            action_for_key(Key::Digit1),
            Some(ControlAction::SetShading(ShadingMode::Flat))
        );
        assert_eq!(
            action_for_key(Key::Digit4),
            Some(ControlAction::SetShading(ShadingMode::ParallaxSelfShadowed))
        );
        assert_eq!(action_for_key(Key::Digit5), None);
    }

    #[test]
    fn movement_keys() {
        assert_eq!(action_for_key(Key::W), Some(ControlAction::MoveForward));
        assert_eq!(action_for_key(Key::Q), Some(ControlAction::MoveUp));
        assert_eq!(action_for_key(Key::E), Some(ControlAction::MoveDown));
        assert_eq!(action_for_key(Key::Escape), Some(ControlAction::Quit));
        assert_eq!(action_for_key(Key::ArrowLeft), None);
    }

    #[test]
    fn shading_presets() {
        let flat = ShadingMode::Flat.flags();
        assert!(!flat.normal_map && !flat.parallax_mapping && !flat.self_shadowing);

        let pom = ShadingMode::Parallax.flags();
        assert!(pom.normal_map && pom.parallax_mapping && !pom.self_shadowing);

        let all = ShadingMode::ParallaxSelfShadowed.flags();
        assert!(all.normal_map && all.parallax_mapping && all.self_shadowing);
    }

    #[test]
    fn default_mode_matches_object_defaults() {
        assert_eq!(ShadingMode::default().flags(), ShadingFlags::default());
    }
}
