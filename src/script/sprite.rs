//! Animated sprite scripts built from pixel templates.

use crate::error::{FactoryError, Result};
use crate::types::{Animation, TemplatePalette};

use super::lua::{quote, seconds, LuaWriter};

/// Emit data tables and a `main` that draws every frame, tags the
/// sequences, saves the project and exports a horizontal sheet.
pub(super) fn write(w: &mut LuaWriter, palette: &TemplatePalette, anim: &Animation) -> Result<()> {
    anim.check()?;
    let (width, height) = anim.size().ok_or_else(|| FactoryError::Build {
        message: "Animation has no frames".to_string(),
        help: None,
    })?;
    for frame in anim.frames() {
        frame.template.check_against(palette)?;
    }

    w.line(&format!("local WIDTH = {}", width));
    w.line(&format!("local HEIGHT = {}", height));
    w.blank();

    w.palette_table("PALETTE", &palette.to_indexed()?);
    w.blank();

    w.open("local FRAMES = {");
    for frame in anim.frames() {
        w.open("{");
        w.line(&format!("name = {},", quote(&frame.template.name)));
        w.line(&format!("duration = {},", seconds(frame.duration_ms)));
        w.rows_table("rows = {", &frame.template, "},");
        w.close("},");
    }
    w.close("}");
    w.blank();

    w.open("local TAGS = {");
    for tag in anim.tags() {
        w.line(&format!(
            "{{ name = {}, from = {}, to = {} }},",
            quote(&tag.name),
            tag.from,
            tag.to
        ));
    }
    w.close("}");
    w.blank();

    w.open("local function main()")
        .line("local spr = Sprite(WIDTH, HEIGHT, ColorMode.INDEXED)")
        .line("apply_palette(spr, PALETTE)")
        .line("spr.transparentColor = 0")
        .line("local layer = spr.layers[1]")
        .line(&format!("layer.name = {}", quote(&palette.name)))
        .open("for i, frame in ipairs(FRAMES) do")
        .open("if i > 1 then")
        .line("spr:newEmptyFrame()")
        .close("end")
        .line("spr.frames[i].duration = frame.duration")
        .line("local img = Image(WIDTH, HEIGHT, ColorMode.INDEXED)")
        .line("draw_rows(img, frame.rows, 0, 0)")
        .line("spr:newCel(layer, i, img, Point(0, 0))")
        .close("end")
        .open("for _, t in ipairs(TAGS) do")
        .line("local tag = spr:newTag(t.from, t.to)")
        .line("tag.name = t.name")
        .close("end")
        .line("spr:saveAs(output_path(\".aseprite\"))")
        .open("app.command.ExportSpriteSheet {")
        .line("ui = false,")
        .line("askOverwrite = false,")
        .line("type = SpriteSheetType.HORIZONTAL,")
        .line("textureFilename = output_path(\".png\"),")
        .line("dataFilename = output_path(\".json\"),")
        .line("dataFormat = SpriteSheetDataFormat.JSON_ARRAY,")
        .line("listTags = true,")
        .close("}")
        .line("print(string.format(\"wrote %d frames to %s\", #FRAMES, output_path(\".aseprite\")))")
        .close("end");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{character_animation, CharacterPreset};
    use crate::types::{Colour, PixelTemplate};

    fn generate(palette: &TemplatePalette, anim: &Animation) -> String {
        let mut w = LuaWriter::new();
        write(&mut w, palette, anim).unwrap();
        w.finish()
    }

    #[test]
    fn test_character_script_embeds_frames_and_tags() {
        let anim = character_animation().unwrap();
        let source = generate(&CharacterPreset::Knight.palette(), &anim);

        assert!(source.contains("local WIDTH = 16"));
        assert_eq!(source.matches("duration = 0.").count(), 6);
        assert!(source.contains("{ name = \"idle\", from = 1, to = 2 },"));
        assert!(source.contains("{ name = \"walk\", from = 3, to = 6 },"));
        assert!(source.contains("duration = 0.5,"));
        assert!(source.contains("duration = 0.12,"));
        assert!(source.contains("layer.name = \"knight\""));
        assert!(source.contains("\"....15555551....\"".replace('.', "0").as_str()));
    }

    #[test]
    fn test_palette_colours_embedded() {
        let anim = character_animation().unwrap();
        let source = generate(&CharacterPreset::Mage.palette(), &anim);
        // mage primary #3B5DC9
        assert!(source.contains("{ 59, 93, 201, 255 },"));
        assert!(source.contains("{ 0, 0, 0, 0 },"));
    }

    #[test]
    fn test_rejects_template_outside_palette() {
        let palette = TemplatePalette::new("tiny").with_slot("only", Colour::BLACK);
        let mut anim = Animation::new();
        anim.push_sequence("idle", vec![PixelTemplate::parse("f", &["12"]).unwrap()], 100)
            .unwrap();

        let mut w = LuaWriter::new();
        assert!(write(&mut w, &palette, &anim).is_err());
    }

    #[test]
    fn test_rejects_empty_animation() {
        let mut w = LuaWriter::new();
        assert!(write(&mut w, &CharacterPreset::Rogue.palette(), &Animation::new()).is_err());
    }
}
