use glam::{Mat4, Quat, Vec2, Vec3};

/// First-person fly camera.
///
/// Looks along `view_direction` from `eye_position`. The up vector stays fixed
/// at +Y; mouse-look yaws about it and pitches about the derived right vector.
#[derive(Debug, Clone)]
pub struct Camera {
    eye_position: Vec3,
    view_direction: Vec3,
    up_vector: Vec3,

    /// Pointer position seen by the previous `mouse_look` call.
    last_pointer: Option<Vec2>,
}

impl Camera {
    /// Camera at `(0, 0, 5)` looking down -Z into the scene.
    pub fn new() -> Self {
        log::debug!("camera created");
        Self {
            eye_position: Vec3::new(0.0, 0.0, 5.0),
            view_direction: Vec3::NEG_Z,
            up_vector: Vec3::Y,
            last_pointer: None,
        }
    }

    /// Rotates the view direction from an absolute pointer position.
    ///
    /// One pixel of pointer travel turns the camera by one degree. The first
    /// call only records the position so the camera does not jump when the
    /// pointer first enters the window.
    pub fn mouse_look(&mut self, mouse_x: f32, mouse_y: f32) {
        let new_pointer = Vec2::new(mouse_x, mouse_y);
        let old_pointer = *self.last_pointer.get_or_insert(new_pointer);
        let delta = old_pointer - new_pointer;

        let yaw = Quat::from_axis_angle(self.up_vector, delta.x.to_radians());
        self.view_direction = yaw * self.view_direction;

        // Looking straight along the up vector leaves no right vector to pitch about.
        if let Some(right) = self.right_vector().try_normalize() {
            let pitch = Quat::from_axis_angle(right, delta.y.to_radians());
            self.view_direction = pitch * self.view_direction;
        }

        self.last_pointer = Some(new_pointer);
    }

    /// Forgets the last pointer position; the next `mouse_look` re-anchors.
    pub fn reset_mouse_look(&mut self) {
        self.last_pointer = None;
    }

    pub fn move_forward(&mut self, speed: f32) {
        self.eye_position += self.view_direction * speed;
    }

    pub fn move_backward(&mut self, speed: f32) {
        self.eye_position -= self.view_direction * speed;
    }

    pub fn move_left(&mut self, speed: f32) {
        self.eye_position -= self.right_vector() * speed;
    }

    pub fn move_right(&mut self, speed: f32) {
        self.eye_position += self.right_vector() * speed;
    }

    pub fn move_up(&mut self, speed: f32) {
        self.eye_position.y += speed;
    }

    pub fn move_down(&mut self, speed: f32) {
        self.eye_position.y -= speed;
    }

    pub fn set_eye_position(&mut self, x: f32, y: f32, z: f32) {
        self.eye_position = Vec3::new(x, y, z);
    }

    pub fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    pub fn view_direction(&self) -> Vec3 {
        self.view_direction
    }

    pub fn up_vector(&self) -> Vec3 {
        self.up_vector
    }

    pub fn eye_x(&self) -> f32 {
        self.eye_position.x
    }

    pub fn eye_y(&self) -> f32 {
        self.eye_position.y
    }

    pub fn eye_z(&self) -> f32 {
        self.eye_position.z
    }

    pub fn view_x(&self) -> f32 {
        self.view_direction.x
    }

    pub fn view_y(&self) -> f32 {
        self.view_direction.y
    }

    pub fn view_z(&self) -> f32 {
        self.view_direction.z
    }

    /// World-to-view matrix looking from the eye toward `eye + view_direction`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.eye_position,
            self.eye_position + self.view_direction,
            self.up_vector,
        )
    }

    /// `view × up`. Not normalized: its length shrinks as the view tilts toward
    /// the up vector, which also slows strafing.
    fn right_vector(&self) -> Vec3 {
        self.view_direction.cross(self.up_vector)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
