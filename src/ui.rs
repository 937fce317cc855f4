//! Menu buttons and HUD panels
//!
//! Screen space is in pixels with the origin at the top-left corner and y
//! growing downward, matching pointer coordinates from the input source.

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

/// Padding around a panel's text
pub const BUTTON_MARGIN: f32 = 10.0;

/// Fixed-pitch glyph cell used to size labels
pub const GLYPH_SIZE: Vec2 = Vec2::new(12.0, 24.0);

pub const NEW_GAME_LABEL: &str = "New Game";
pub const QUIT_LABEL: &str = "Quit Game";

/// Button anchors: horizontal centre and top edge
pub const NEW_GAME_ANCHOR: Vec2 = Vec2::new(380.0, 80.0);
pub const QUIT_ANCHOR: Vec2 = Vec2::new(380.0, 200.0);

const HUD_SCORE_AT: Vec2 = Vec2::new(20.0, 20.0);
const HUD_LIVES_AT: Vec2 = Vec2::new(20.0, 60.0);
const GAME_OVER_SCORE_AT: Vec2 = Vec2::new(350.0, 140.0);

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Inclusive on every edge
pub fn point_in_rect(p: Vec2, rect: &Rect) -> bool {
    p.x >= rect.left && p.x <= rect.right && p.y >= rect.top && p.y <= rect.bottom
}

/// Rendered size of a single-line label
pub fn label_size(text: &str) -> Vec2 {
    Vec2::new(text.chars().count() as f32 * GLYPH_SIZE.x, GLYPH_SIZE.y)
}

/// Clickable area of a button anchored at `anchor`.
/// The left edge is half a label to the left of the anchor; the box then
/// spans the label plus a margin on both sides.
pub fn button_rect(anchor: Vec2, text: &str) -> Rect {
    let size = label_size(text);
    let left = anchor.x - size.x * 0.5;
    Rect {
        left,
        right: left + size.x + BUTTON_MARGIN * 2.0,
        top: anchor.y,
        bottom: anchor.y + size.y + BUTTON_MARGIN * 2.0,
    }
}

/// Menu button hit areas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLayout {
    pub new_game: Rect,
    pub quit: Rect,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            new_game: button_rect(NEW_GAME_ANCHOR, NEW_GAME_LABEL),
            quit: button_rect(QUIT_ANCHOR, QUIT_LABEL),
        }
    }
}

/// What a click on the menu selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    Quit,
}

impl MenuLayout {
    pub fn hit(&self, p: Vec2) -> Option<MenuAction> {
        if point_in_rect(p, &self.new_game) {
            Some(MenuAction::NewGame)
        } else if point_in_rect(p, &self.quit) {
            Some(MenuAction::Quit)
        } else {
            None
        }
    }
}

/// A framed text box for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub text: String,
    /// Top-left corner of the text
    pub position: Vec2,
    pub margin: f32,
    pub text_color: [f32; 4],
    pub background: [f32; 4],
    pub border: [f32; 4],
}

impl Panel {
    pub fn new(text: impl Into<String>, position: Vec2) -> Self {
        Self {
            text: text.into(),
            position,
            margin: BUTTON_MARGIN,
            text_color: [1.0, 1.0, 1.0, 1.0],
            background: [0.1, 0.1, 0.1, 0.3],
            border: [1.0, 1.0, 1.0, 0.25],
        }
    }

    fn button(anchor: Vec2, text: &str) -> Self {
        let size = label_size(text);
        Self::new(text, Vec2::new(anchor.x - size.x * 0.5, anchor.y))
    }
}

/// Panels to draw for the current phase
pub fn hud_panels(state: &GameState) -> Vec<Panel> {
    let score = format!("Score: {}", state.score);
    match state.phase {
        GamePhase::Playing => vec![
            Panel::new(score, HUD_SCORE_AT),
            Panel::new(format!("Lives: {}", state.lives), HUD_LIVES_AT),
        ],
        GamePhase::Paused => vec![
            Panel::button(NEW_GAME_ANCHOR, NEW_GAME_LABEL),
            Panel::button(QUIT_ANCHOR, QUIT_LABEL),
        ],
        GamePhase::GameOver => vec![
            Panel::button(NEW_GAME_ANCHOR, NEW_GAME_LABEL),
            Panel::new(score, GAME_OVER_SCORE_AT),
            Panel::button(QUIT_ANCHOR, QUIT_LABEL),
        ],
    }
}
