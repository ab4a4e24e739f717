use crate::word::Word;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// Anything that can answer "does this element cover that terminal cell".
pub trait Node {
    fn contains(&self, column: u16, row: u16) -> bool;
}

/// A rectangle of terminal cells.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` x `height` rect centered in a `columns` x `rows` screen,
    /// shrunk to fit if the screen is smaller.
    pub fn centered(columns: u16, rows: u16, width: u16, height: u16) -> Self {
        let (width, height) = (width.min(columns), height.min(rows));

        Self {
            x: (columns - width) / 2,
            y: (rows - height) / 2,
            width,
            height,
        }
    }

    /// One past the last column, saturating at `u16::MAX`.
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row, saturating at `u16::MAX`.
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }
}

impl Node for Rect {
    #[inline]
    fn contains(&self, column: u16, row: u16) -> bool {
        // Widen so a rect touching u16::MAX still covers its last cell
        let (column, row) = (u32::from(column), u32::from(row));

        column >= u32::from(self.x)
            && column < u32::from(self.x) + u32::from(self.width)
            && row >= u32::from(self.y)
            && row < u32::from(self.y) + u32::from(self.height)
    }
}

/// Shared handle to the bounds of an element that may not be laid out yet.
///
/// Clones observe the same bounds, so the renderer can keep one clone and
/// update it every frame while a watcher holds another.
#[derive(Debug, Default, Clone)]
pub struct NodeRef(Rc<Cell<Option<Rect>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, bounds: Rect) {
        self.0.set(Some(bounds));
    }

    pub fn unset(&self) {
        self.0.set(None);
    }

    pub fn get(&self) -> Option<Rect> {
        self.0.get()
    }
}

impl Node for NodeRef {
    fn contains(&self, column: u16, row: u16) -> bool {
        Node::contains(&self.get(), column, row)
    }
}

impl<T: Node> Node for Option<T> {
    fn contains(&self, column: u16, row: u16) -> bool {
        match self {
            Some(node) => node.contains(column, row),
            None => false,
        }
    }
}

impl<T: Node + ?Sized> Node for &T {
    fn contains(&self, column: u16, row: u16) -> bool {
        (**self).contains(column, row)
    }
}

/// Everything the host shell draws from.
pub struct State {
    pub columns: u16,
    pub rows: u16,
    pub panel: NodeRef,
    pub panel_size: (u16, u16),
    pub word: Rc<RefCell<Word>>,
    pub outside_clicks: Rc<Cell<u32>>,
    pub last_click: Option<(u16, u16)>,
    pub running: bool,
}

impl State {
    pub fn new(columns: u16, rows: u16, panel_size: (u16, u16), word: Word) -> Self {
        let mut state = Self {
            columns,
            rows,
            panel: NodeRef::new(),
            panel_size,
            word: Rc::new(RefCell::new(word)),
            outside_clicks: Rc::new(Cell::new(0)),
            last_click: None,
            running: true,
        };
        state.resize(columns, rows);
        state
    }

    /// Re-centers the panel in a screen of the new size. The last row is
    /// kept free for the help line.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;

        let (width, height) = self.panel_size;
        self.panel.set(Rect::centered(
            columns,
            rows.saturating_sub(1),
            width,
            height,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 10, 20, 10);

        assert!(rect.contains(10, 10));
        assert!(rect.contains(29, 19));
        assert!(rect.contains(20, 15));

        assert!(!rect.contains(9, 10));
        assert!(!rect.contains(30, 10));
        assert!(!rect.contains(10, 9));
        assert!(!rect.contains(10, 20));
        assert!(!rect.contains(0, 0));
    }

    #[test]
    fn test_rect_zero_size() {
        let rect = Rect::new(5, 5, 0, 0);

        assert!(!rect.contains(5, 5));
        assert!(!rect.contains(4, 4));
    }

    #[test]
    fn test_rect_at_edge_of_u16() {
        let rect = Rect::new(u16::MAX - 1, u16::MAX - 1, 5, 5);

        assert!(rect.contains(u16::MAX, u16::MAX));
        assert!(rect.contains(u16::MAX - 1, u16::MAX));
        assert!(!rect.contains(u16::MAX - 2, u16::MAX));
        assert_eq!(rect.right(), u16::MAX);
    }

    #[test]
    fn test_rect_centered() {
        assert_eq!(Rect::centered(80, 24, 40, 8), Rect::new(20, 8, 40, 8));
        // Larger than the screen gets clamped
        assert_eq!(Rect::centered(10, 4, 40, 8), Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn test_node_ref_shares_bounds() {
        let node = NodeRef::new();
        let watcher_view = node.clone();

        assert!(!watcher_view.contains(0, 0));

        node.set(Rect::new(0, 0, 2, 2));
        assert!(watcher_view.contains(1, 1));

        node.unset();
        assert!(!watcher_view.contains(1, 1));
        assert_eq!(watcher_view.get(), None);
    }

    #[test]
    fn test_state_keeps_panel_centered_on_resize() {
        let state_word = Word::new(0, "typing");
        let mut state = State::new(80, 25, (40, 7), state_word);

        assert_eq!(state.panel.get(), Some(Rect::new(20, 8, 40, 7)));

        state.resize(20, 5);
        assert_eq!(state.panel.get(), Some(Rect::new(0, 0, 20, 4)));
        assert_eq!((state.columns, state.rows), (20, 5));
    }

    #[test]
    fn test_option_node() {
        let none: Option<Rect> = None;
        assert!(!Node::contains(&none, 0, 0));
        assert!(Node::contains(&Some(Rect::new(0, 0, 1, 1)), 0, 0));
    }
}
