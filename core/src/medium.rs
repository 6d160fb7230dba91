use serde::{Deserialize, Serialize};

pub type DeviceId = char;

/// A signal occupying one travel direction of a cable cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    Empty,
    Carrier(DeviceId),
    Jam,
}

impl Signal {
    pub fn is_present(&self) -> bool {
        !matches!(self, Signal::Empty)
    }

    pub fn glyph(&self) -> char {
        match self {
            Signal::Empty => '_',
            Signal::Carrier(id) => *id,
            Signal::Jam => '#',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub left: Signal,  // signal traveling leftward
    pub right: Signal, // signal traveling rightward
}

impl Cell {
    /// Stamp a new signal into the cell, in both travel directions.
    /// A side that is already occupied turns into jam.
    pub fn inject(&mut self, id: DeviceId) {
        self.left = match self.left {
            Signal::Empty => Signal::Carrier(id),
            _ => Signal::Jam,
        };
        self.right = match self.right {
            Signal::Empty => Signal::Carrier(id),
            _ => Signal::Jam,
        };
    }

    pub fn is_clear(&self) -> bool {
        !self.left.is_present() && !self.right.is_present()
    }

    pub fn has_jam(&self) -> bool {
        self.left == Signal::Jam || self.right == Signal::Jam
    }

    pub fn glyph(&self) -> char {
        if self.left.is_present() {
            self.left.glyph()
        } else {
            self.right.glyph()
        }
    }
}

/// The shared cable: a fixed-length row of cells.
/// Propagation is double-buffered, so every device in a round observes the
/// same snapshot no matter in which order the driver visits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medium {
    cells: Vec<Cell>,
}

impl Medium {
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![Cell::default(); length],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: usize) -> &Cell {
        &self.cells[pos]
    }

    pub fn is_idle(&self) -> bool {
        self.cells.iter().all(Cell::is_clear)
    }

    pub fn inject(&mut self, pos: usize, id: DeviceId) {
        self.cells[pos].inject(id);
    }

    /// Advance every signal by one cell and resolve collisions.
    ///
    /// Each boundary between cell `i` and `i + 1` moves at most two signals:
    /// the rightward one leaving `i` and the leftward one leaving `i + 1`.
    /// If both are present they cross, and jam is written traveling outward
    /// on both sides. Jam counts as a present signal, so it keeps spreading
    /// one cell per round until it falls off an end. A next-snapshot cell
    /// occupied in both directions collapses to jam: two signals can meet
    /// inside a cell without ever sharing a boundary. Signals at the cable
    /// ends leave the medium.
    pub fn propagate(&self) -> Medium {
        let mut next = Medium::new(self.cells.len());
        for i in 0..self.cells.len().saturating_sub(1) {
            let rightward = self.cells[i].right;
            let leftward = self.cells[i + 1].left;
            match (rightward.is_present(), leftward.is_present()) {
                (true, true) => {
                    next.cells[i].left = Signal::Jam;
                    next.cells[i + 1].right = Signal::Jam;
                }
                (true, false) => next.cells[i + 1].right = rightward,
                (false, true) => next.cells[i].left = leftward,
                (false, false) => {}
            }
        }
        for cell in &mut next.cells {
            if cell.left.is_present() && cell.right.is_present() {
                cell.left = Signal::Jam;
                cell.right = Signal::Jam;
            }
        }
        next
    }

    /// One line per round: `_` empty, `#` jam, otherwise the carrier symbol.
    pub fn render(&self) -> String {
        self.cells.iter().map(Cell::glyph).collect()
    }
}
