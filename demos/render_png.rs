use std::sync::Arc;

use image::{ImageBuffer, Rgba};
use kasane::{
    Color, FontLibrary, ParseOptions, Style, StyleSheet, TextAlign,
    markup::{StyledTextParser, TagFlow, TagHandlers},
    renderer::SurfaceOptions,
    text::{LayoutMode, StyledTextLayout},
};

const STYLES: &str = r##"{
    "styles": {
        "fontFamily": "sans-serif",
        "fontSize": 22,
        "color": "#202020",
        "title": { "fontSize": 40, "fontWeight": 700, "textAlign": "center" },
        "body": {
            "small": { "fontSize": 16, "color": "#606060", "textAlign": "right" }
        }
    }
}"##;

fn parser() -> StyledTextParser {
    // `<hr>` becomes a row of dashes on its own line.
    let mut handlers = TagHandlers::new();
    handlers.insert("<hr>", |ctx| {
        *ctx.token = "\n----------------\n".to_string();
        TagFlow::Continue
    });
    StyledTextParser::with_handlers(
        ParseOptions::INVERT_NESTED_ITALICS | ParseOptions::TRIM_WHITESPACE,
        handlers,
    )
}

#[allow(clippy::unwrap_used)]
fn main() {
    let fonts = Arc::new(FontLibrary::new());
    fonts.load_system_fonts();

    let mut styles = StyleSheet::new();
    styles.load_str(STYLES, "styles").unwrap();

    let mut layout = StyledTextLayout::with_parser(fonts.clone(), parser());
    layout.set_max_width(520.0);
    layout.set_padding_symmetric(16.0, 24.0);
    layout.set_layout_mode(LayoutMode::WordWrap);
    layout.set_leading_disabled(false);

    layout.set_text_named("Kasane", "title", &styles);
    layout.append_text_named(
        "<p>Styled text with <b>bold</b>, <i>italic and <i>nested</i> italic</i> \
         runs, wrapped against a maximum width. &lt;tags&gt; can be escaped.</p><hr>",
        "body",
        &styles,
    );
    layout.append_text_named("right aligned footnote", "body.small", &styles);
    layout.append_plain_text_styled(
        "\nplain <text> is never parsed",
        Style::default()
            .with_font_family("monospace")
            .with_color(Color::rgb(0.1, 0.3, 0.7))
            .with_text_align(TextAlign::Left),
    );

    let size = layout.text_size();
    println!(
        "{} segments, {} lines, {}x{} px",
        layout.segments().len(),
        layout.lines().len(),
        size.width,
        size.height
    );

    let options = SurfaceOptions {
        clear_color: Color::WHITE,
        ..SurfaceOptions::default()
    };
    let surface = layout.render_to_surface(fonts.as_ref(), &options);

    let image: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(
        surface.width as u32,
        surface.height as u32,
        surface.pixels,
    )
    .unwrap();
    image.save("render_png.png").unwrap();
}
