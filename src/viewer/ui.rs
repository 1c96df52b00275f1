//! Viewer rendering: skeleton canvas plus a key-hint footer.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::{theme, ViewerApp};
use crate::constants;
use crate::provider::BodyDataProvider;

/// Draws one frame of the viewer.
pub fn render<P: BodyDataProvider + ?Sized>(frame: &mut Frame, app: &ViewerApp<'_, P>) {
    let [canvas_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    render_canvas(frame, app, canvas_area);
    render_footer(frame, app, footer_area);
}

fn render_canvas<P: BodyDataProvider + ?Sized>(frame: &mut Frame, app: &ViewerApp<'_, P>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(constants::TITLE_VIEWER)
        .title_bottom(
            Line::from(format!(" t = {} us ", app.current_timestamp()))
                .style(Style::default().fg(theme::TEXT_SECONDARY))
                .right_aligned(),
        );

    let (Some(bounds), true) = (app.bounds(), app.has_skeleton()) else {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                constants::LABEL_NO_SKELETON,
                Style::default().fg(theme::ERROR),
            ))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let radius = bounds.screen_radius();
    let segments = app.projected_bones();
    let floor = {
        let center = bounds.center();
        let corner = |x: f64, y: f64| app.view().project([x, y, bounds.min], center);
        [
            (corner(bounds.min, bounds.min), corner(bounds.max, bounds.min)),
            (corner(bounds.max, bounds.min), corner(bounds.max, bounds.max)),
            (corner(bounds.max, bounds.max), corner(bounds.min, bounds.max)),
            (corner(bounds.min, bounds.max), corner(bounds.min, bounds.min)),
        ]
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-radius, radius])
        .y_bounds([-radius, radius])
        .paint(move |ctx| {
            for ((x1, y1), (x2, y2)) in floor {
                ctx.draw(&Segment::new(x1, y1, x2, y2, theme::GUIDE));
            }
            ctx.layer();
            for &((x1, y1), (x2, y2)) in &segments {
                ctx.draw(&Segment::new(x1, y1, x2, y2, theme::BONE));
            }
        });

    frame.render_widget(canvas, area);
}

fn render_footer<P: BodyDataProvider + ?Sized>(frame: &mut Frame, app: &ViewerApp<'_, P>, area: Rect) {
    let hints = [
        ("Space", "Pause"),
        ("←→", "Yaw"),
        ("↑↓", "Pitch"),
        ("r", "Restart"),
        ("q", "Quit"),
    ];

    let [hint_area, status_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(28)]).areas(area);

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(theme::GUIDE)));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*action, Style::default().fg(theme::TEXT_SECONDARY)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), hint_area);

    let (label, color) = if app.is_paused() {
        (constants::LABEL_PAUSED, theme::WARNING)
    } else {
        (constants::LABEL_PLAYING, theme::SUCCESS)
    };
    let (index, total) = app.frame_position();
    let status = Line::from(vec![
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  frame {}/{total} ", index + 1),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), status_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::provider::tests::synthetic_data;
    use ndarray::arr1;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen<P: BodyDataProvider + ?Sized>(app: &ViewerApp<'_, P>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_missing_skeleton_notice() {
        let mut data = synthetic_data(3, 30.0);
        data.insert(constants::KEY_FRAME_COUNT, arr1(&[0.0]).into_dyn());
        let app = ViewerApp::new(&data, &ViewerConfig::default()).unwrap();
        assert!(!app.has_skeleton());

        let text = screen(&app);
        assert!(text.contains(constants::LABEL_NO_SKELETON));
    }

    #[test]
    fn test_footer_status() {
        let data = synthetic_data(25, 30.0);
        let app = ViewerApp::new(&data, &ViewerConfig::default()).unwrap();

        let text = screen(&app);
        assert!(text.contains(constants::LABEL_PLAYING));
        assert!(text.contains("frame 1/3"));
        assert!(!text.contains(constants::LABEL_NO_SKELETON));
    }
}
