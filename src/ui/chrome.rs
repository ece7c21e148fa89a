use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear};

const OPAQUE_BACKGROUND: Color = Color::Rgb(28, 28, 32);
const BORDER: Color = Color::DarkGray;

/// Floating container the bar content is mounted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayChrome {
    pub reduce_transparency: bool,
}

impl OverlayChrome {
    pub fn new(reduce_transparency: bool) -> Self {
        Self {
            reduce_transparency,
        }
    }

    pub fn background(&self) -> Style {
        if self.reduce_transparency {
            Style::default().bg(OPAQUE_BACKGROUND)
        } else {
            Style::default()
        }
    }

    /// Clears `area`, draws the rounded frame and returns the content rect.
    pub fn draw(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        if area.width == 0 || area.height == 0 {
            return Rect::new(area.x, area.y, 0, 0);
        }
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .style(self.background());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}
