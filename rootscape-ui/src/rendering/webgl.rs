//! WebGL program that renders the root basins.
//!
//! One full-viewport quad is drawn per frame; all fractal work happens in the
//! fragment shader, driven by the uniforms uploaded through [`ShaderParams`].

use rootscape_core::{Color, Root, ShaderParams, ViewWindow, MAX_ROOTS};
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl, WebGlShader,
    WebGlUniformLocation,
};

use super::canvas_utils::{fit_canvas, get_webgl_context};

const VERTEX_SHADER: &str = include_str!("shaders/shader.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/shader.frag");

/// Triangle strip covering clip space.
const QUAD: [f32; 8] = [1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, -1.0];

struct Uniforms {
    view_window: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    roots: Option<WebGlUniformLocation>,
    colors: Option<WebGlUniformLocation>,
    root_count: Option<WebGlUniformLocation>,
    iterations: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &Gl, program: &WebGlProgram) -> Self {
        let locate = |name: &str| {
            let location = gl.get_uniform_location(program, name);
            if location.is_none() {
                log::warn!("uniform {name} is not active in the shader program");
            }
            location
        };
        Self {
            view_window: locate("u_viewWindow"),
            resolution: locate("u_resolution"),
            roots: locate("u_roots"),
            colors: locate("u_colors"),
            root_count: locate("u_rootCount"),
            iterations: locate("u_iterations"),
        }
    }
}

pub struct WebGlRenderer {
    gl: Gl,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    quad: WebGlBuffer,
    position: u32,
    uniforms: Uniforms,
}

impl WebGlRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let gl = get_webgl_context(&canvas)?;

        let vertex = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        gl.use_program(Some(&program));

        let quad = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("Unable to create quad buffer"))?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&quad));
        let vertices = js_sys::Float32Array::from(&QUAD[..]);
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &vertices, Gl::STATIC_DRAW);

        let position = gl.get_attrib_location(&program, "a_position");
        let position = u32::try_from(position)
            .map_err(|_| JsValue::from_str("Vertex attribute a_position not found"))?;

        let uniforms = Uniforms::locate(&gl, &program);

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        log::info!("WebGL program ready");
        Ok(Self {
            gl,
            canvas,
            program,
            quad,
            position,
            uniforms,
        })
    }
}

impl ShaderParams for WebGlRenderer {
    fn set_view_window(&mut self, window: &ViewWindow, canvas_size: (u32, u32)) {
        let (width, height) = canvas_size;
        fit_canvas(&self.canvas, canvas_size);

        self.gl
            .uniform1fv_with_f32_array(self.uniforms.view_window.as_ref(), &window.as_uniform());
        self.gl
            .uniform2f(self.uniforms.resolution.as_ref(), width as f32, height as f32);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn set_roots(&mut self, roots: &[Root]) {
        let roots = capped(roots, "roots");
        let data: Vec<f32> = roots
            .iter()
            .flat_map(|root| [*root.x() as f32, *root.y() as f32])
            .collect();

        self.gl
            .uniform2fv_with_f32_array(self.uniforms.roots.as_ref(), &data);
        self.gl
            .uniform1i(self.uniforms.root_count.as_ref(), roots.len() as i32);
    }

    fn set_colors(&mut self, colors: &[Color]) {
        let data: Vec<f32> = capped(colors, "colors")
            .iter()
            .flat_map(|color| [color.r, color.g, color.b])
            .collect();

        self.gl
            .uniform3fv_with_f32_array(self.uniforms.colors.as_ref(), &data);
    }

    fn set_iterations(&mut self, iterations: u32) {
        self.gl
            .uniform1i(self.uniforms.iterations.as_ref(), iterations as i32);
    }

    fn request_redraw(&mut self) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.quad));
        gl.vertex_attrib_pointer_with_i32(self.position, 2, Gl::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(self.position);

        gl.use_program(Some(&self.program));
        gl.draw_arrays(Gl::TRIANGLE_STRIP, 0, 4);
    }
}

/// The shader arrays hold at most `MAX_ROOTS` entries; extras are dropped.
fn capped<'a, T>(items: &'a [T], what: &str) -> &'a [T] {
    if items.len() > MAX_ROOTS {
        log::warn!("{} {what} exceed the shader limit of {MAX_ROOTS}", items.len());
        &items[..MAX_ROOTS]
    } else {
        items
    }
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("Unable to create shader object"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!(
            "An error occurred compiling the shaders: {info}"
        )))
    }
}

fn link_program(
    gl: &Gl,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("Unable to create shader program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(JsValue::from_str(&format!(
            "Unable to initialize the shader program: {info}"
        )))
    }
}
