//! In-memory backend with a back buffer and a published front buffer.
//!
//! Used for headless hosts and tests. `flush` copies the back buffer to the front buffer;
//! there is no diffing.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::attribute::Attribute;
use crate::core::backend::Backend;

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCell {
    pub ch: char,
    pub fg: Attribute,
    pub bg: Attribute,
}

impl Default for BufferCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Attribute::DEFAULT,
            bg: Attribute::DEFAULT,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    width: usize,
    height: usize,
    initialized: bool,
    back: Vec<BufferCell>,
    front: Vec<BufferCell>,
    cursor: Option<(i32, i32)>,
    front_cursor: Option<(i32, i32)>,
    clears: usize,
    flushes: usize,
}

impl MemoryState {
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

/// Cloneable handle to a shared cell grid; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    /// A `width` x `height` grid. Starts uninitialized, like a terminal not yet set up.
    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![BufferCell::default(); width * height];
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                width,
                height,
                back: cells.clone(),
                front: cells,
                ..MemoryState::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn init(&self) {
        self.lock().initialized = true;
    }

    pub fn shutdown(&self) {
        self.lock().initialized = false;
    }

    pub fn size(&self) -> (usize, usize) {
        let state = self.lock();
        (state.width, state.height)
    }

    pub fn flush_count(&self) -> usize {
        self.lock().flushes
    }

    pub fn clear_count(&self) -> usize {
        self.lock().clears
    }

    /// Published cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Option<BufferCell> {
        let state = self.lock();
        state.index(x, y).map(|idx| state.front[idx])
    }

    /// Published row `y` as text, trailing blanks trimmed.
    pub fn line(&self, y: usize) -> String {
        let state = self.lock();
        if y >= state.height {
            return String::new();
        }
        let start = y * state.width;
        let row: String = state.front[start..start + state.width]
            .iter()
            .map(|cell| cell.ch)
            .collect();
        row.trim_end().to_string()
    }

    /// Published cursor position, `None` when hidden.
    pub fn cursor(&self) -> Option<(i32, i32)> {
        self.lock().front_cursor
    }
}

impl Backend for MemoryBackend {
    fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    fn clear(&mut self, fg: Attribute, bg: Attribute) {
        let mut state = self.lock();
        let blank = BufferCell { ch: ' ', fg, bg };
        state.back.fill(blank);
        state.clears += 1;
    }

    fn hide_cursor(&mut self) {
        self.lock().cursor = None;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.lock().cursor = Some((x, y));
    }

    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Attribute, bg: Attribute) {
        let mut state = self.lock();
        if let Some(idx) = state.index(x, y) {
            state.back[idx] = BufferCell { ch, fg, bg };
        }
    }

    fn flush(&mut self) {
        let mut state = self.lock();
        let back = state.back.clone();
        state.front = back;
        state.front_cursor = state.cursor;
        state.flushes += 1;
    }
}
