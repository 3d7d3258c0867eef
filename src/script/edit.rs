//! Scripts that open an existing image and transform it.

use super::lua::LuaWriter;

/// Walk-cycle vertical offsets applied to copies of the first frame.
const WALK_OFFSETS: [i32; 4] = [0, -1, 0, -1];

/// Walk-cycle frame duration in milliseconds.
const WALK_FRAME_MS: u32 = 150;

fn open_input(w: &mut LuaWriter) {
    w.line("local input = param(\"input_file\")")
        .line("local spr = app.open(input)")
        .open("if spr == nil then")
        .line("error(\"could not open \" .. input)")
        .close("end")
        .open("if spr.colorMode ~= ColorMode.RGB then")
        .line("app.command.ChangePixelFormat { format = \"rgb\" }")
        .close("end");
}

fn reduce_palette(w: &mut LuaWriter) {
    w.open("app.command.ColorQuantization {")
        .line("ui = false,")
        .line("withAlpha = true,")
        .line("maxColors = tonumber(param(\"palette_size\")),")
        .close("}")
        .line("app.command.ChangePixelFormat { format = \"indexed\", dithering = \"none\" }");
}

/// Palette reduction ahead of native tile slicing.
///
/// Saves `<basename>_source.aseprite` and `<basename>_quantized.png`.
pub(super) fn write_quantize(w: &mut LuaWriter) {
    w.open("local function main()");
    open_input(w);
    reduce_palette(w);
    w.line("spr:saveAs(output_path(\"_source.aseprite\"))")
        .line("spr:saveCopyAs(output_path(\"_quantized.png\"))")
        .line("print(string.format(\"quantized %dx%d to %d colours\", spr.width, spr.height, #spr.palettes[1]))")
        .close("end");
}

/// Palette reduction, nearest-neighbour resize, optional walk cycle.
///
/// The palette is captured before resizing and reapplied afterwards so the
/// resize cannot introduce new colours.
pub(super) fn write_process(w: &mut LuaWriter) {
    let offsets: Vec<String> = WALK_OFFSETS.iter().map(|o| o.to_string()).collect();
    w.line(&format!("local WALK_OFFSETS = {{ {} }}", offsets.join(", ")));
    w.line(&format!("local WALK_DURATION = {}", super::lua::seconds(WALK_FRAME_MS)));
    w.blank();

    w.open("local function main()");
    open_input(w);
    reduce_palette(w);
    w.line("local palette = Palette(spr.palettes[1])")
        .open("app.command.SpriteSize {")
        .line("ui = false,")
        .line("lockRatio = false,")
        .line("method = \"nearest\",")
        .line("width = tonumber(param(\"target_width\")),")
        .line("height = tonumber(param(\"target_height\")),")
        .close("}")
        .line("spr:setPalette(palette)")
        .open("if param(\"gen_walkcycle\", \"false\") == \"true\" then")
        .open("for _ = 2, #WALK_OFFSETS do")
        .line("spr:newFrame(#spr.frames)")
        .close("end")
        .open("for i, dy in ipairs(WALK_OFFSETS) do")
        .line("spr.frames[i].duration = WALK_DURATION")
        .line("local cel = spr.layers[1]:cel(i)")
        .open("if cel ~= nil then")
        .line("cel.position = Point(cel.position.x, cel.position.y + dy)")
        .close("end")
        .close("end")
        .line("local tag = spr:newTag(1, #WALK_OFFSETS)")
        .line("tag.name = \"walk\"")
        .close("end")
        .line("spr:saveAs(output_path(\".aseprite\"))")
        .open("app.command.ExportSpriteSheet {")
        .line("ui = false,")
        .line("askOverwrite = false,")
        .line("type = SpriteSheetType.HORIZONTAL,")
        .line("textureFilename = output_path(\".png\"),")
        .close("}")
        .line("print(string.format(\"processed to %dx%d, %d frames\", spr.width, spr.height, #spr.frames))")
        .close("end");
}

/// Frame count produced by `process_sprite`.
pub fn process_frame_count(gen_walkcycle: bool) -> usize {
    if gen_walkcycle {
        WALK_OFFSETS.len()
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_reads_params() {
        let mut w = LuaWriter::new();
        write_quantize(&mut w);
        let source = w.finish();
        assert!(source.contains("param(\"input_file\")"));
        assert!(source.contains("maxColors = tonumber(param(\"palette_size\")),"));
        assert!(source.contains("output_path(\"_quantized.png\")"));
    }

    #[test]
    fn test_process_restores_palette_after_resize() {
        let mut w = LuaWriter::new();
        write_process(&mut w);
        let source = w.finish();

        let capture = source.find("local palette = Palette(spr.palettes[1])").unwrap();
        let resize = source.find("app.command.SpriteSize {").unwrap();
        let restore = source.find("spr:setPalette(palette)").unwrap();
        assert!(capture < resize && resize < restore);
        assert!(source.contains("method = \"nearest\","));
        assert!(source.contains("local WALK_OFFSETS = { 0, -1, 0, -1 }"));
    }

    #[test]
    fn test_process_frame_count() {
        assert_eq!(process_frame_count(false), 1);
        assert_eq!(process_frame_count(true), 4);
    }
}
