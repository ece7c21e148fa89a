use ratatui::layout::Rect;

/// Places the bar centered horizontally in the upper fifth of `parent`.
pub fn bar_rect(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(parent.width);
    let height = height.max(1).min(parent.height);
    let x = parent.x + (parent.width.saturating_sub(width)) / 2;
    let free = parent.height.saturating_sub(height);
    let y = parent.y + (parent.height / 5).min(free);
    Rect::new(x, y, width, height)
}

pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{bar_rect, centered_rect};

    #[test]
    fn bar_rect_sits_in_upper_part_of_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let rect = bar_rect(parent, 60, 10);
        assert_eq!(rect, Rect::new(20, 8, 60, 10));
    }

    #[test]
    fn bar_rect_is_clamped_inside_small_parent() {
        let parent = Rect::new(4, 2, 30, 6);
        let rect = bar_rect(parent, 72, 12);
        assert_eq!(rect, Rect::new(4, 2, 30, 6));

        let rect = bar_rect(parent, 10, 5);
        assert_eq!(rect.y + rect.height, 8);
        assert!(rect.y >= parent.y);
    }

    #[test]
    fn centered_rect_stays_within_area() {
        let area = Rect::new(10, 5, 20, 8);
        let centered = centered_rect(area, 99, 99);
        assert_eq!(centered.x, 10);
        assert_eq!(centered.y, 5);
        assert_eq!(centered.width, 20);
        assert_eq!(centered.height, 8);
    }
}
