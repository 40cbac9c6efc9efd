/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Compose the next frame into `front` (a grid of `Glyph`)
///   2. Compare each glyph with `back` (previous frame)
///   3. Emit terminal commands only for glyphs that changed, batched with `queue!`
///   4. Swap front/back
///
/// Reads the session, never mutates it.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use drunk_chase::domain::entity::EntityKind;
use drunk_chase::sim::session::{Phase, Session};

// ── Glyph: one terminal column ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::White, bg: Glyph::BASE_BG };

    /// Never drawn; forces a full repaint when stored in the back buffer.
    const INVALID: Glyph = Glyph { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color) -> Self {
        Glyph { ch, fg, bg: Self::BASE_BG }
    }
}

// ── FrameBuffer ──

struct FrameBuffer {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, glyphs: vec![Glyph::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            *self = FrameBuffer::new(w, h);
        }
    }

    fn set(&mut self, x: usize, y: usize, g: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x] = g;
        }
    }

    fn get(&self, x: usize, y: usize) -> Glyph {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x]
        } else {
            Glyph::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i, y, Glyph::new(ch, fg));
        }
    }
}

// ── Renderer ──

/// Each field cell is two terminal columns wide, so the grid looks square.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const SETTINGS_ROW: usize = 1;
const FIELD_ROW: usize = 3;
const FIELD_COL: usize = 1;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(8192, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Glyph::BASE_BG),
            Clear(ClearType::All)
        )?;
        self.fit_terminal()
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    /// Match buffers to the terminal size; repaint everything if it changed.
    fn fit_terminal(&mut self) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        let (tw, th) = (tw as usize, th as usize);
        if tw != self.front.width || th != self.front.height {
            self.front.resize(tw, th);
            self.back.resize(tw, th);
            self.back.glyphs.fill(Glyph::INVALID);
            queue!(self.writer, SetBackgroundColor(Glyph::BASE_BG), Clear(ClearType::All))?;
        }
        Ok(())
    }

    pub fn render(&mut self, session: &Session) -> io::Result<()> {
        self.fit_terminal()?;

        self.front.glyphs.fill(Glyph::BLANK);
        self.compose_hud(session);
        let below = self.compose_field(session);
        self.compose_help(session, below + 1);
        if session.phase == Phase::GameOver {
            self.compose_banner(session);
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Glyph::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let g = self.front.get(x, y);
                if g == self.back.get(x, y) {
                    continue;
                }
                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if g.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(g.fg))?;
                    last_fg = g.fg;
                }
                if g.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(g.bg))?;
                    last_bg = g.bg;
                }
                queue!(self.writer, Print(g.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose ──

    fn compose_hud(&mut self, s: &Session) {
        let status = match s.phase {
            Phase::Paused => "PAUSED",
            Phase::Caught | Phase::GameOver => "CAUGHT",
            Phase::Playing => "",
        };
        let hud = format!(" DRUNK CHASE   Moves: {:<6} {}", s.moves, status);
        self.front.put_str(0, HUD_ROW, &hud, Color::Yellow);

        let c = &s.config;
        let settings = format!(
            " fieldSize: {}  barriers: {}%  pursuers: {}  speed: {}ms  seed: {}",
            c.field_size, c.barrier_percent, c.pursuers, c.tick_rate_ms, s.seed
        );
        self.front.put_str(0, SETTINGS_ROW, &settings, Color::DarkGrey);
    }

    /// Draw the bordered field. Returns the first row below it.
    fn compose_field(&mut self, s: &Session) -> usize {
        let field = s.world.field();
        let size = field.size();
        let inner_w = size * CELL_W;
        let border = Color::DarkGrey;

        let top = FIELD_ROW;
        let left = FIELD_COL;
        self.front.set(left, top, Glyph::new('┌', border));
        self.front.set(left + inner_w + 1, top, Glyph::new('┐', border));
        self.front.set(left, top + size + 1, Glyph::new('└', border));
        self.front.set(left + inner_w + 1, top + size + 1, Glyph::new('┘', border));
        for x in 1..=inner_w {
            self.front.set(left + x, top, Glyph::new('─', border));
            self.front.set(left + x, top + size + 1, Glyph::new('─', border));
        }
        for y in 1..=size {
            self.front.set(left, top + y, Glyph::new('│', border));
            self.front.set(left + inner_w + 1, top + y, Glyph::new('│', border));
        }

        for (idx, cell) in field.cells() {
            let (a, b) = match s.world.occupant(idx).map(|e| e.kind) {
                None => (Glyph::new('·', Color::DarkGrey), Glyph::BLANK),
                Some(EntityKind::Barrier) => {
                    let wall = Glyph::new('█', Color::Grey);
                    (wall, wall)
                }
                Some(EntityKind::Hero) => (Glyph::new('@', Color::Yellow), Glyph::BLANK),
                Some(EntityKind::Pursuer) => (Glyph::new('X', Color::Red), Glyph::BLANK),
            };
            let x = left + 1 + cell.column * CELL_W;
            let y = top + 1 + cell.row;
            self.front.set(x, y, a);
            self.front.set(x + 1, y, b);
        }

        top + size + 2
    }

    fn compose_help(&mut self, s: &Session, row: usize) {
        let pause = if s.phase == Phase::Paused { "[P] Resume" } else { "[P] Pause" };
        let help = format!(" {pause}  [R] New game  [Q] Quit");
        self.front.put_str(0, row, &help, Color::DarkGrey);
    }

    /// End-of-game message centred over the field.
    fn compose_banner(&mut self, s: &Session) {
        let who = s.captor_number().map_or(String::new(), |n| format!(" by pursuer #{n}"));
        let lines = [
            String::new(),
            format!("  CAUGHT{who} after {} moves!  ", s.moves),
            "  [R] New game   [Q] Quit  ".to_string(),
            String::new(),
        ];
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let field_w = s.world.field().size() * CELL_W + 2;
        let field_h = s.world.field().size() + 2;
        let x0 = (FIELD_COL + field_w / 2).saturating_sub(width / 2);
        let y0 = (FIELD_ROW + field_h / 2).saturating_sub(lines.len() / 2);

        for (i, line) in lines.iter().enumerate() {
            for dx in 0..width {
                self.front.set(x0 + dx, y0 + i, Glyph { ch: ' ', fg: Color::White, bg: Color::DarkRed });
            }
            for (dx, ch) in line.chars().enumerate() {
                self.front.set(x0 + dx, y0 + i, Glyph { ch, fg: Color::White, bg: Color::DarkRed });
            }
        }
    }
}
