use glam::Vec2;
use pong_client::Surface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context is null"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("failed to cast to 2d context"))?;
        Ok(Self { ctx })
    }

    fn set_dash(&self, dash: &[f32]) {
        let pattern = dash
            .iter()
            .map(|d| JsValue::from_f64(*d as f64))
            .collect::<js_sys::Array>();
        if let Err(e) = self.ctx.set_line_dash(&pattern) {
            log::warn!("setLineDash failed: {:?}", e);
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, origin: Vec2, size: Vec2) {
        self.ctx.clear_rect(
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn dashed_line(&mut self, from: Vec2, to: Vec2, dash: [f32; 2], color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.set_dash(&dash);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        self.set_dash(&[]);
    }
}
