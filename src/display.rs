//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game.  No game logic is performed; this module only translates the
//! snapshot into terminal commands, scaling canvas pixels to cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::entities::{EnemyTier, GameWorld};
use space_invaders::geometry::{Bounds, Rect};
use space_invaders::scores::HighScore;
use space_invaders::{GameState, LossReason, Outcome, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_WAVE: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY_TOP: Color = Color::Magenta;
const C_ENEMY_MID: Color = Color::Cyan;
const C_ENEMY_LOW: Color = Color::White;
const C_SPECIAL: Color = Color::Red;
const C_SHIELD: Color = Color::Green;
const C_SHOT_PLAYER: Color = Color::Yellow;
const C_SHOT_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Everything the renderer needs for one frame.
pub struct View<'a> {
    pub snapshot: Snapshot<'a>,
    pub arena: Bounds,
    pub high_scores: &'a [HighScore],
    pub best: u32,
    pub nickname: &'a str,
    /// Points per extra life, shown on the controls panel.
    pub extra_life_every: u32,
}

/// Maps canvas pixels onto the cells inside the border.
struct Projection {
    arena: Bounds,
    width: u16,
    height: u16,
}

impl Projection {
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(4) as f32;
        let cx = 1.0 + (x / self.arena.width * cols).clamp(0.0, (cols - 1.0).max(0.0));
        let cy = 2.0 + (y / self.arena.height * rows).clamp(0.0, (rows - 1.0).max(0.0));
        (cx as u16, cy as u16)
    }

    /// Cell span of a rect's width, at least one.
    fn span(&self, rect: &Rect) -> usize {
        let cols = self.width.saturating_sub(2) as f32;
        ((rect.w / self.arena.width * cols).round() as usize).max(1)
    }

    fn visible(&self, rect: &Rect) -> bool {
        rect.right() > 0.0 && rect.x < self.arena.width
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &View<'_>) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;

    match view.snapshot.state {
        GameState::Menu => draw_menu(out, view, width, height)?,
        GameState::Controls => draw_controls(out, view, width, height)?,
        GameState::HighScores => draw_high_scores(out, view, width, height)?,
        GameState::Playing => {
            draw_border(out, width, height)?;
            draw_hud(out, view, width)?;
            if let Some(world) = view.snapshot.world {
                let proj = Projection { arena: view.arena, width, height };
                draw_world(out, world, &proj, view.snapshot.player_hit)?;
            }
            draw_controls_hint(out, height)?;
        }
        GameState::GameOver(outcome) => {
            draw_border(out, width, height)?;
            draw_hud(out, view, width)?;
            draw_game_over(out, view, outcome, width, height)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &View<'_>, width: u16) -> std::io::Result<()> {
    let snap = &view.snapshot;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if view.best > 0 {
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}", snap.score, view.best.max(snap.score))))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", snap.score)))?;
    }

    let wave_str = format!("[ WAVE {} ]", snap.wave);
    let wx = (width / 2).saturating_sub(wave_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(snap.lives as usize));
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(
    out: &mut W,
    world: &GameWorld,
    proj: &Projection,
    player_hit: bool,
) -> std::io::Result<()> {
    for block in &world.shields {
        let glyph = match block.damage_tier() {
            0 => "█",
            1 => "▓",
            _ => "░",
        };
        draw_rect(out, proj, &block.rect, glyph, C_SHIELD)?;
    }

    for enemy in &world.enemies {
        let (sprite, color) = match enemy.tier {
            EnemyTier::Top => ("«▼»", C_ENEMY_TOP),
            EnemyTier::Mid => ("{◎}", C_ENEMY_MID),
            EnemyTier::Low => ("/▀\\", C_ENEMY_LOW),
        };
        draw_sprite(out, proj, &enemy.rect, sprite, color)?;
    }

    if let Some(special) = &world.special {
        if proj.visible(&special.rect) {
            draw_sprite(out, proj, &special.rect, "<═◎═>", C_SPECIAL)?;
        }
    }

    for shot in &world.enemy_projectiles {
        draw_sprite(out, proj, &shot.rect, "↓", C_SHOT_ENEMY)?;
    }
    if let Some(shot) = &world.player_projectile {
        draw_sprite(out, proj, &shot.rect, "║", C_SHOT_PLAYER)?;
    }

    let color = if player_hit { C_PLAYER_HIT } else { C_PLAYER };
    draw_sprite(out, proj, &world.player.rect, "/▲\\", color)
}

/// Print `sprite` centred on the rect's cell span.
fn draw_sprite<W: Write>(
    out: &mut W,
    proj: &Projection,
    rect: &Rect,
    sprite: &str,
    color: Color,
) -> std::io::Result<()> {
    let (cx, cy) = proj.cell(rect.center_x(), rect.y);
    let half = sprite.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(cx.saturating_sub(half).max(1), cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

/// Fill the rect's cell span with `glyph`.
fn draw_rect<W: Write>(
    out: &mut W,
    proj: &Projection,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (cx, cy) = proj.cell(rect.x, rect.y);
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph.repeat(proj.span(rect))))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ESC : Quit"))?;
    Ok(())
}

// ── Panels ────────────────────────────────────────────────────────────────────

/// Print centred lines starting at `start_row`.
fn draw_lines<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    width: u16,
    start_row: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, view: &View<'_>, width: u16, height: u16) -> std::io::Result<()> {
    let mut lines = vec![("★  SPACE  INVADERS  ★".to_string(), Color::Cyan)];
    if view.best > 0 {
        lines.push((format!("Best Score: {}", view.best), Color::Yellow));
    }
    lines.push((String::new(), Color::White));
    lines.push(("[ENTER] Play".to_string(), Color::Green));
    lines.push(("[H] High Scores".to_string(), Color::White));
    lines.push(("[C] Controls".to_string(), Color::White));
    lines.push(("[Q] Quit".to_string(), Color::DarkGrey));

    let start = (height / 2).saturating_sub(lines.len() as u16 / 2 + 2);
    draw_lines(out, &lines, width, start)
}

fn draw_controls<W: Write>(
    out: &mut W,
    view: &View<'_>,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let mut lines: Vec<(String, Color)> = [
        ("CONTROLS", Color::Cyan),
        ("", Color::White),
        ("← / A      move left ", Color::White),
        ("→ / D      move right", Color::White),
        ("SPACE      shoot     ", Color::White),
        ("ESC        quit      ", Color::White),
        ("", Color::White),
        ("One shot on screen at a time.", Color::DarkGrey),
    ]
    .iter()
    .map(|(s, c)| (s.to_string(), *c))
    .collect();
    lines.push((format!("Extra life every {} points.", view.extra_life_every), Color::DarkGrey));
    lines.push((String::new(), Color::White));
    lines.push(("[ESC] Back".to_string(), Color::DarkGrey));

    let start = (height / 2).saturating_sub(lines.len() as u16 / 2);
    draw_lines(out, &lines, width, start)
}

fn draw_high_scores<W: Write>(
    out: &mut W,
    view: &View<'_>,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let mut lines = vec![("HIGH SCORES".to_string(), Color::Cyan), (String::new(), Color::White)];
    if view.high_scores.is_empty() {
        lines.push(("No scores yet".to_string(), Color::DarkGrey));
    }
    for (i, record) in view.high_scores.iter().enumerate() {
        let color = if i == 0 { Color::Yellow } else { Color::White };
        lines.push((format!("{:>2}. {:<10} {:>7}", i + 1, record.nickname, record.score), color));
    }
    lines.push((String::new(), Color::White));
    lines.push(("[ESC] Back".to_string(), Color::DarkGrey));

    let start = (height / 2).saturating_sub(lines.len() as u16 / 2);
    draw_lines(out, &lines, width, start)
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &View<'_>,
    outcome: Outcome,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score = view.snapshot.score;
    let (title, title_color) = match outcome {
        Outcome::Won => ("║     YOU  WIN!      ║", Color::Green),
        Outcome::Lost(_) => ("║    GAME  OVER      ║", Color::Red),
    };
    let reason = match outcome {
        Outcome::Won => "Target score reached",
        Outcome::Lost(LossReason::OutOfLives) => "No lives left",
        Outcome::Lost(LossReason::Overrun) => "The invaders landed",
    };
    let best_line = if score > view.best && score > 0 {
        (format!("★ NEW BEST: {:>6} ★", score), Color::Yellow)
    } else {
        (format!("Best Score:  {:>6}", view.best.max(score)), Color::DarkGrey)
    };

    let lines = vec![
        ("╔════════════════════╗".to_string(), title_color),
        (title.to_string(), title_color),
        ("╚════════════════════╝".to_string(), title_color),
        (reason.to_string(), Color::White),
        (format!("Final Score: {:>6}", score), Color::Yellow),
        best_line,
        (String::new(), Color::White),
        (format!("Name: {:<10}_", view.nickname), Color::Cyan),
        ("ENTER - Play Again   ESC - Menu".to_string(), Color::White),
    ];

    let start = (height / 2).saturating_sub(lines.len() as u16 / 2);
    draw_lines(out, &lines, width, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use space_invaders::{Game, GameConfig};

    #[test]
    fn controls_panel_shows_configured_extra_life_threshold() {
        let mut config = GameConfig::default();
        config.rules.extra_life_every = 2500;
        let game = Game::with_seed(config, 1).unwrap();
        let view = View {
            snapshot: game.snapshot(),
            arena: Bounds { width: 800.0, height: 600.0 },
            high_scores: &[],
            best: 0,
            nickname: "",
            extra_life_every: game.config().rules.extra_life_every,
        };

        let mut out = Vec::new();
        draw_controls(&mut out, &view, 80, 24).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Extra life every 2500 points."));
    }
}
