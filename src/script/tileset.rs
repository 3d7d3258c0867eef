//! Placeholder tileset script.

use crate::error::Result;
use crate::templates::{tile_palette, tileset_layout, TileKind, TILE_SIZE};

use super::lua::{quote, LuaWriter};

pub(super) fn write(w: &mut LuaWriter, columns: u32, rows: u32) -> Result<()> {
    let palette = tile_palette();

    w.line(&format!("local COLUMNS = {}", columns));
    w.line(&format!("local ROWS = {}", rows));
    w.line(&format!("local TILE = {}", TILE_SIZE));
    w.blank();

    w.palette_table("PALETTE", &palette.to_indexed()?);
    w.blank();

    w.open("local TILES = {");
    for kind in TileKind::ALL {
        let template = kind.template()?;
        template.check_against(&palette)?;
        w.rows_table(&format!("{} = {{", kind.name()), &template, "},");
    }
    w.close("}");
    w.blank();

    let layout = tileset_layout(columns, rows);
    w.open("local LAYOUT = {");
    for row in layout.chunks(columns.max(1) as usize) {
        let names: Vec<String> = row.iter().map(|k| format!("{},", quote(k.name()))).collect();
        w.line(&names.join(" "));
    }
    w.close("}");
    w.blank();

    w.open("local function main()")
        .line("local spr = Sprite(COLUMNS * TILE, ROWS * TILE, ColorMode.INDEXED)")
        .line("apply_palette(spr, PALETTE)")
        .line("local img = Image(spr.width, spr.height, ColorMode.INDEXED)")
        .open("for i, name in ipairs(LAYOUT) do")
        .line("local col = (i - 1) % COLUMNS")
        .line("local row = (i - 1) // COLUMNS")
        .line("draw_rows(img, TILES[name], col * TILE, row * TILE)")
        .close("end")
        .line("spr:newCel(spr.layers[1], 1, img, Point(0, 0))")
        .line("spr.layers[1].name = \"tiles\"")
        .line("spr:saveAs(output_path(\".aseprite\"))")
        .line("spr:saveCopyAs(output_path(\".png\"))")
        .line("print(string.format(\"wrote %dx%d tileset\", spr.width, spr.height))")
        .close("end");

    Ok(())
}
