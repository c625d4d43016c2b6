use anyhow::ensure;

use kiln_engine::app::{AppConfig, Application, FrameCtx, Layer};
use kiln_engine::coords::Size2D;
use kiln_engine::graphics::{GraphicsDevice, Mesh, ShaderProgram};
use kiln_engine::input::KeyCode;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::paint::Rgba;
use kiln_engine::platform::desktop::{GlInit, WinitPlatform};
use kiln_engine::platform::WindowConfig;

const VERTEX_SHADER: &str = r#"#version 330 core
layout(location = 0) in vec3 a_VertexPos;

out vec3 v_Pos;

void main() {
    v_Pos = a_VertexPos;
    gl_Position = vec4(a_VertexPos, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
in vec3 v_Pos;

out vec4 o_Color;

void main() {
    o_Color = vec4(v_Pos + 0.5, 1.0);
}
"#;

/// Draws a quad, or a triangle while Space is held. F1 toggles the shader,
/// Escape quits.
#[derive(Default)]
struct SandboxLayer {
    quad: Option<Mesh>,
    triangle: Option<Mesh>,
    shader: Option<ShaderProgram>,
    shader_enabled: bool,
}

impl Layer for SandboxLayer {
    fn on_attach(&mut self, device: &mut GraphicsDevice) {
        self.quad = Some(Mesh::quad(device));
        self.triangle = Some(Mesh::triangle(device));

        let shader = ShaderProgram::new(device, "sandbox", VERTEX_SHADER, FRAGMENT_SHADER);
        if let Some(err) = shader.error() {
            log::warn!("drawing without a shader: {err}");
        }
        self.shader_enabled = shader.valid();
        self.shader = Some(shader);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) {
        if ctx.input.key_just_pressed(KeyCode::Escape) {
            ctx.request_exit();
            return;
        }
        if ctx.input.key_just_pressed(KeyCode::F1) {
            self.shader_enabled = !self.shader_enabled;
            log::info!("shader {}", if self.shader_enabled { "on" } else { "off" });
        }

        let mesh = if ctx.input.key_pressed(KeyCode::Space) {
            self.triangle.as_ref()
        } else {
            self.quad.as_ref()
        };
        let shader = self
            .shader
            .as_ref()
            .filter(|s| self.shader_enabled && s.valid());

        if let Some(mesh) = mesh {
            ctx.renderer.draw_mesh(mesh, shader);
        }
    }

    fn on_detach(&mut self, device: &mut GraphicsDevice) {
        for mesh in [self.quad.take(), self.triangle.take()].into_iter().flatten() {
            mesh.release(device);
        }
        if let Some(shader) = self.shader.take() {
            shader.release(device);
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = AppConfig {
        window: WindowConfig {
            title: "Kiln Sandbox".to_string(),
            size: Size2D::new(1280, 720),
        },
        clear_color: Rgba::from_u8(24, 24, 32, 255),
    };

    let mut app = Application::new(WinitPlatform::new(GlInit::default()), config);
    ensure!(app.initialized(), "application failed to initialize");

    app.set_layer(Box::new(SandboxLayer::default()));
    app.run(None);

    log::info!(
        "sandbox exited after {} frames and {} events",
        app.loop_count(),
        app.events_processed()
    );
    Ok(())
}
