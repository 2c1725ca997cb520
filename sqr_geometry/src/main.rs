use color_eyre::{eyre::OptionExt, Result as EyreResult};
use glam::{IVec2, Vec2, Vec3};
use sqr_geometry::{AttrName, DataUsage, Geometry, GlContext, LinkedProgram, ShaderDescriptor};
use sqr_gl::{
    gl,
    glfw::{self, Key, Window},
    info::GlString,
    shader::Shader,
    vertex::VertexArrayObject,
    GlError, GlErrorGuard,
};

const POSITIONS: [f32; 6] = [-0.5, -0.5, 0.5, -0.5, 0.0, 0.5];

// fields drop in order, so GL objects go before the window owning the context
struct App {
    ctx: GlContext,
    vao: VertexArrayObject,
    program: LinkedProgram,
    offset_location: Option<i32>,
    geometry: Geometry,

    window: Window,
    window_size: IVec2,
}

fn corner_colors(time: f32) -> [f32; 9] {
    let mut colors = [0.0; 9];
    for (corner, rgb) in colors.chunks_exact_mut(3).enumerate() {
        let phase = time + corner as f32 * std::f32::consts::TAU / 3.0;
        let color = Vec3::new(phase.sin(), (phase + 2.0).sin(), (phase + 4.0).sin()) * 0.5 + 0.5;
        rgb.copy_from_slice(&color.to_array());
    }
    colors
}

impl App {
    fn run(width: i32, height: i32, title: &str) -> EyreResult<()> {
        glfw::install_errors();
        glfw::init().ok_or_eyre("glfw init failed")?;
        glfw::hint_core_profile(3, 3);

        let window = Window::create(width, height, title)?;
        window.make_current();

        gl::load_with(glfw::get_proc_address);

        for info in [GlString::Renderer, GlString::Version] {
            if let Some(value) = info.get_gl() {
                log::info!("{info:?}: {value}");
            }
        }

        let vao = VertexArrayObject::new().ok_or_eyre("vertex array creation failed")?;
        let vs = Shader::vertex(include_str!("shader/triangle.vert"))?;
        let fs = Shader::fragment(include_str!("shader/triangle.frag"))?;
        let program = LinkedProgram::link([vs, fs])?;
        let offset_location = program.program().uniform_location("uOffset");
        log::info!(
            "shader wants {} attributes: {:?}",
            program.num_attributes(),
            program.attributes()
        );

        let mut geometry = Geometry::new();
        geometry
            .quick_setup("v2c3")?
            .data(AttrName::Position, POSITIONS)?
            .data(AttrName::Color, corner_colors(0.0))?;

        let mut ctx = GlContext::current();
        GlErrorGuard::guard_named("Geometry upload", || {
            geometry.setup_buffers(&mut ctx, &program, DataUsage::DYNAMIC_DRAW)
        })?;
        geometry.mark_clean();

        Self {
            ctx,
            vao,
            program,
            offset_location,
            geometry,
            window,
            window_size: IVec2::ZERO,
        }
        .run_internal()?;

        glfw::terminate();
        Ok(())
    }

    fn run_internal(mut self) -> EyreResult<()> {
        while !self.window.should_close() {
            self.tick()?;
        }
        self.geometry.release_buffers(&mut self.ctx);
        Ok(())
    }

    fn tick(&mut self) -> EyreResult<()> {
        if let Some(err) = GlError::try_get() {
            log::error!("gl error: {err:?}");
        }
        if self.window.is_key_down(Key::Escape) {
            self.window.set_should_close(true);
        }

        let new_size = self.window.get_framebuffer_size();
        if new_size != self.window_size {
            unsafe { gl::Viewport(0, 0, new_size.x, new_size.y) };
            self.window_size = new_size;
        }

        let time = glfw::get_time() as f32;
        self.geometry.data(AttrName::Color, corner_colors(time))?;
        if self.geometry.is_dirty() {
            let Self {
                ctx,
                program,
                geometry,
                ..
            } = self;
            GlErrorGuard::guard_named("Geometry upload", || {
                geometry.setup_buffers(ctx, &*program, DataUsage::DYNAMIC_DRAW)
            })?;
            geometry.mark_clean();
        }

        let offset = Vec2::from_angle(time) * 0.2;
        GlErrorGuard::guard_named("Draw", || {
            self.vao.use_self();
            self.program.program().use_self();
            if let Some(location) = self.offset_location {
                self.program.program().set_uniform_vec2(location, offset.x, offset.y);
            }
            unsafe {
                gl::Clear(gl::COLOR_BUFFER_BIT);
                gl::DrawArrays(gl::TRIANGLES, 0, self.geometry.count() as i32);
            }
        });

        self.window.swap_buffers();
        glfw::poll_events();
        Ok(())
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    App::run(1000, 800, "sqr geometry")
}
