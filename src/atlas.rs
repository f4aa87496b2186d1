use flapboard_core::{AtlasStyle, GlyphSet};
use wasm_bindgen::JsCast;
use web_sys as web;

/// RGBA pixels of a square glyph atlas.
pub struct AtlasImage {
    pub size: u32,
    pub rgba: Vec<u8>,
}

/// Rasterise every glyph of `glyphs` into a `side x side` grid on a scratch
/// canvas. A thin background band is drawn across each row at the hinge line.
pub fn build_atlas(
    document: &web::Document,
    glyphs: &GlyphSet,
    style: &AtlasStyle,
) -> anyhow::Result<AtlasImage> {
    let side = glyphs.side().max(1);
    let cell = style.cell_size as f64;
    let size = style.atlas_pixels(side);

    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(size);
    canvas.set_height(size);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    ctx.set_fill_style_str(&style.background);
    ctx.fill_rect(0.0, 0.0, size as f64, size as f64);
    ctx.set_font(&style.font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    let symbols = glyphs.symbols();
    let mut buf = [0u8; 4];
    for y in 0..side {
        for x in 0..side {
            let i = (y * side + x) as usize;
            let Some(&c) = symbols.get(i) else {
                break;
            };
            ctx.set_fill_style_str(&style.foreground);
            _ = ctx.fill_text(
                c.encode_utf8(&mut buf),
                (x as f64 + 0.5) * cell,
                (y as f64 + 0.5) * cell,
            );
        }
        ctx.set_fill_style_str(&style.background);
        let band = cell * style.hinge_band;
        ctx.fill_rect(
            0.0,
            y as f64 * cell + cell / 2.0 - band / 2.0,
            size as f64,
            band,
        );
    }

    let image = ctx
        .get_image_data(0.0, 0.0, size as f64, size as f64)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    log::info!("[atlas] {}x{} glyphs, {}px", side, side, size);
    Ok(AtlasImage {
        size,
        rgba: image.data().0,
    })
}
