/// Rendering layer — all terminal I/O lives here.
///
/// The board is addressed in canvas pixels by the library; this module maps
/// pixels onto terminal cells (one 101×83 tile = 10 columns × 3 rows) and
/// draws sprites as coloured glyph blocks.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use bug_crossing::engine::Notice;
use bug_crossing::entities::{Avatar, GameState, Sprite};
use bug_crossing::error::GameResult;
use bug_crossing::render::{AssetProvider, Surface, NUM_COLS, NUM_ROWS, ROW_TILES, TILE_HEIGHT, TILE_WIDTH};

// ── Geometry ──────────────────────────────────────────────────────────────────

pub const COLS_PER_TILE: u16 = 10;
pub const ROWS_PER_TILE: u16 = 3;
/// Row 0 is the HUD; the board starts underneath.
pub const HUD_ROWS: u16 = 1;
pub const BOARD_COLS: u16 = COLS_PER_TILE * NUM_COLS as u16;
pub const BOARD_ROWS: u16 = ROWS_PER_TILE * NUM_ROWS as u16;

/// Entity images are tall with empty space on top; the visible part starts
/// about this far below the draw position.
const SPRITE_OFFSET_Y: f32 = 40.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_LIVES: Color = Color::Red;
const C_HUD_AVATAR: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_NOTICE: Color = Color::Yellow;

const MAX_HEARTS: usize = 5;
const CONTROLS_HINT: &str = "← ↑ → ↓ / W A S D : Move   Q / ESC / Ctrl-C : Quit";

// ── Glyphs ────────────────────────────────────────────────────────────────────

/// A sprite as the terminal draws it.  Tiles carry a background colour and
/// fill their whole cell block; entities are drawn over whatever row they
/// stand on.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub rows: &'static [&'static str],
    pub fg: Color,
    pub bg: Option<Color>,
}

fn glyph_for(sprite: Sprite) -> Glyph {
    match sprite {
        Sprite::WaterBlock => Glyph {
            rows: &["~  ~  ~  ~", "  ~  ~  ~ ", "~  ~  ~  ~"],
            fg: Color::Cyan,
            bg: Some(Color::DarkBlue),
        },
        Sprite::StoneBlock => Glyph {
            rows: &["          ", "   .    . ", "▁▁▁▁▁▁▁▁▁▁"],
            fg: Color::Grey,
            bg: Some(Color::DarkGrey),
        },
        Sprite::GrassBlock => Glyph {
            rows: &[" \" ,   \"  ", "   ,  \" , ", "\"   \" ,   "],
            fg: Color::Green,
            bg: Some(Color::DarkGreen),
        },
        Sprite::EnemyBug => Glyph {
            rows: &[" ,/\\, ", "<(@@@)"],
            fg: Color::Red,
            bg: None,
        },
        Sprite::Character(avatar) => avatar_glyph(avatar),
    }
}

static BOY: [&str; 2] = [" o ", "/|\\"];
static CAT_GIRL: [&str; 2] = ["^o^", "/|\\"];
static HORN_GIRL: [&str; 2] = ["}o{", "/|\\"];
static PINK_GIRL: [&str; 2] = ["*o*", "/|\\"];
static PRINCESS_GIRL: [&str; 2] = ["♕o♕", "/|\\"];

fn avatar_glyph(avatar: Avatar) -> Glyph {
    let (rows, fg) = match avatar {
        Avatar::Boy => (&BOY[..], Color::White),
        Avatar::CatGirl => (&CAT_GIRL[..], Color::Yellow),
        Avatar::HornGirl => (&HORN_GIRL[..], Color::Magenta),
        Avatar::PinkGirl => (&PINK_GIRL[..], Color::Red),
        Avatar::PrincessGirl => (&PRINCESS_GIRL[..], Color::Yellow),
    };
    Glyph { rows, fg, bg: None }
}

/// Builds glyphs on load and keeps them for the rest of the run.
#[derive(Default)]
pub struct GlyphAtlas {
    requested: Vec<Sprite>,
    glyphs: HashMap<Sprite, Glyph>,
}

impl AssetProvider for GlyphAtlas {
    type Handle = Glyph;

    fn load(&mut self, sprites: &[Sprite]) -> GameResult<()> {
        for &sprite in sprites {
            self.requested.push(sprite);
            self.glyphs.entry(sprite).or_insert_with(|| glyph_for(sprite));
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.requested.iter().all(|s| self.glyphs.contains_key(s))
    }

    fn get(&self, sprite: Sprite) -> Option<&Glyph> {
        self.glyphs.get(&sprite)
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

fn px_to_col(x: f32) -> i32 {
    (x / TILE_WIDTH * COLS_PER_TILE as f32).round() as i32
}

fn px_to_row(y: f32) -> i32 {
    (y / TILE_HEIGHT * ROWS_PER_TILE as f32).floor() as i32
}

/// Background colour of the board row under terminal row `row` (board-relative).
fn row_background(row: i32) -> Color {
    let tile_row = (row.max(0) as usize / ROWS_PER_TILE as usize).min(NUM_ROWS - 1);
    glyph_for(ROW_TILES[tile_row]).bg.unwrap_or(Color::Reset)
}

pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        TerminalSurface { out }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Print `text` at board cell (`col`, `row`), dropping whatever falls
    /// outside the board.
    fn put(&mut self, col: i32, row: i32, text: &str, fg: Color, bg: Color) -> std::io::Result<()> {
        if row < 0 || row >= BOARD_ROWS as i32 {
            return Ok(());
        }
        let visible: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| {
                let c = col + *i as i32;
                c >= 0 && c < BOARD_COLS as i32
            })
            .map(|(_, ch)| ch)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        self.out
            .queue(cursor::MoveTo(col.max(0) as u16, row as u16 + HUD_ROWS))?;
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(style::SetBackgroundColor(bg))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Image = Glyph;

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> std::io::Result<()> {
        if x <= 0.0 && y <= 0.0 && px_to_col(width) >= BOARD_COLS as i32 {
            self.out.queue(style::ResetColor)?;
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            return Ok(());
        }
        let (c0, r0) = (px_to_col(x), px_to_row(y));
        let (c1, r1) = (px_to_col(x + width), px_to_row(y + height));
        let blank = " ".repeat((c1 - c0).max(0) as usize);
        for row in r0..r1 {
            self.put(c0, row, &blank, Color::Reset, Color::Reset)?;
        }
        Ok(())
    }

    fn draw_image(&mut self, image: &Glyph, x: f32, y: f32) -> std::io::Result<()> {
        match image.bg {
            Some(bg) => {
                let (col, row) = (px_to_col(x), px_to_row(y));
                for (i, line) in image.rows.iter().enumerate() {
                    self.put(col, row + i as i32, line, image.fg, bg)?;
                }
            }
            None => {
                // Centre the glyph within the tile-wide column it occupies.
                let width = image.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
                let col = px_to_col(x) + (COLS_PER_TILE as i32 - width) / 2;
                let row = px_to_row(y + SPRITE_OFFSET_Y);
                for (i, line) in image.rows.iter().enumerate() {
                    let r = row + i as i32;
                    self.put(col, r, line, image.fg, row_background(r))?;
                }
            }
        }
        Ok(())
    }
}

// ── HUD (row 0) and hint (below the board) ───────────────────────────────────

pub fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;

    // Lives — left
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {:<5}", lives_label(state.player.lives))))?;

    // Avatar — right
    let name = state.player.avatar.label();
    out.queue(cursor::MoveTo(
        BOARD_COLS.saturating_sub(name.chars().count() as u16),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_HUD_AVATAR))?;
    out.queue(Print(name))?;

    out.queue(cursor::MoveTo(0, HUD_ROWS + BOARD_ROWS))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

/// Hearts for small counts, a compact `♥ xN` beyond what fits the HUD field.
fn lives_label(lives: u32) -> String {
    if lives as usize <= MAX_HEARTS {
        "♥".repeat(lives as usize)
    } else {
        format!("♥ x{lives}")
    }
}

// ── Transient hit notice ──────────────────────────────────────────────────────

pub fn draw_notice<W: Write>(out: &mut W, notice: &Notice) -> std::io::Result<()> {
    let plural = if notice.lives_left == 1 { "life" } else { "lives" };
    let lines = [
        "Collision!".to_string(),
        format!("You have been hit. {} {} left.", notice.lives_left, plural),
    ];
    let start_row = HUD_ROWS + BOARD_ROWS / 2 - 1;
    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(style::SetForegroundColor(C_NOTICE))?;
    for (i, line) in lines.iter().enumerate() {
        let col = (BOARD_COLS / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

/// Draw a centred box of lines over the board.
pub fn draw_dialog<W: Write>(out: &mut W, lines: &[(String, Color)]) -> std::io::Result<()> {
    let inner = lines
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    let border = "═".repeat(inner);
    let total_rows = lines.len() as u16 + 2;
    let start_row = (HUD_ROWS + BOARD_ROWS / 2).saturating_sub(total_rows / 2);
    let col = (BOARD_COLS / 2).saturating_sub(inner as u16 / 2 + 1);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(cursor::MoveTo(col, start_row))?;
    out.queue(Print(format!("╔{}╗", border)))?;
    for (i, (line, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(col, start_row + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("║ "))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<width$}", line, width = inner - 2)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(" ║"))?;
    }
    out.queue(cursor::MoveTo(col, start_row + total_rows - 1))?;
    out.queue(Print(format!("╚{}╝", border)))?;
    out.queue(style::ResetColor)?;
    out.flush()
}
