//! Paints a render model onto a ratatui frame.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::view::{CellStyle, RenderModel};

use super::layout::column_offset;
use super::style::Styles;

/// Main render function.
pub fn render(frame: &mut Frame, model: &RenderModel) {
    let area = frame.area();
    paint(frame.buffer_mut(), area, model);
}

/// Writes every cell at its row and column offset, clipped to `area`.
pub fn paint(buf: &mut Buffer, area: Rect, model: &RenderModel) {
    // Label row gets a full-width bar.
    for row in model
        .cells
        .iter()
        .filter(|c| c.style == CellStyle::ColumnHeader)
        .map(|c| c.row)
        .take(1)
    {
        if row < area.height {
            buf.set_style(
                Rect::new(area.x, area.y + row, area.width, 1),
                Styles::table_header(),
            );
        }
    }

    for cell in &model.cells {
        let offset = column_offset(cell.column);
        if cell.row >= area.height || offset >= area.width {
            continue;
        }
        let x = area.x + offset;
        let y = area.y + cell.row;
        let max_width = (area.width - offset) as usize;
        buf.set_stringn(x, y, &cell.text, max_width, Styles::from_class(cell.style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Column;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_cells_land_at_column_offsets() {
        let mut model = RenderModel::default();
        model.push(0, Column::Slab, "1".to_string(), CellStyle::Normal);
        model.push(0, Column::Size, "96".to_string(), CellStyle::Normal);
        model.push(0, Column::Used, "10922".to_string(), CellStyle::Normal);

        let mut terminal = Terminal::new(TestBackend::new(40, 2)).unwrap();
        terminal.draw(|frame| render(frame, &model)).unwrap();
        let buf = terminal.backend().buffer();
        let first = line(buf, 0);
        assert_eq!(&first[0..1], "1");
        assert_eq!(&first[10..12], "96");
        assert_eq!(&first[18..23], "10922");
    }

    #[test]
    fn test_clipped_to_area() {
        let mut model = RenderModel::default();
        model.push(0, Column::Slab, "HEADER TEXT THAT IS LONG".to_string(), CellStyle::Header);
        model.push(0, Column::Hit, "off-screen".to_string(), CellStyle::Normal);
        model.push(5, Column::Slab, "below".to_string(), CellStyle::Normal);

        let mut terminal = Terminal::new(TestBackend::new(10, 2)).unwrap();
        terminal.draw(|frame| render(frame, &model)).unwrap();
        let buf = terminal.backend().buffer();
        assert_eq!(line(buf, 0), "HEADER TEX");
        assert_eq!(line(buf, 1).trim(), "");
    }

    #[test]
    fn test_warning_style_applied() {
        let mut model = RenderModel::default();
        model.push(0, Column::Slab, "12".to_string(), CellStyle::Warning);
        let mut terminal = Terminal::new(TestBackend::new(10, 1)).unwrap();
        terminal.draw(|frame| render(frame, &model)).unwrap();
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].style().fg, Styles::warning().fg);
    }
}
