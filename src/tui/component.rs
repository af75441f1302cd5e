use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields) and render into a
/// `Frame` within a given `Rect`. Long-lived state stays in core `App`;
/// components are built fresh for every draw.
///
/// `render` takes `&mut self` so a component can fill in presentation state
/// (list offsets, measured heights) during the render pass, in line with
/// ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
