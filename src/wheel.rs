//! The wheel controller: one owner for items, segments, spin and drag state.
//!
//! All edits go through [`Wheel`], which keeps segments in sync with items and
//! refuses changes while a spin is in flight. Two layouts exist:
//!
//! - [`Layout::Weighted`]: segments are allocated from item weights.
//! - [`Layout::Manual`]: entered by dragging a boundary or placing an item at
//!   explicit angles. Geometry is authoritative; item weights are rewritten to
//!   the spans in degrees and gaps are allowed.
//!
//! Renaming or recoloring an item keeps the manual geometry. Adding, removing,
//! reweighting or resetting re-allocates from the weights and returns to the
//! weighted layout, closing gaps proportionally.

use crate::boundary::{place_span, BoundaryEditor, BoundaryKind, DragState, WheelGeometry};
use crate::clock::FrameSource;
use crate::random::RandomSource;
use crate::segment::{allocate, resolve, Color, Segment, WheelItem};
use crate::spin::{
    simulate_spin, SimulateOptions, SpinConfig, SpinEngine, SpinPhase, SpinPlan, SpinRun, Tick,
};
use crate::util::{WheelError, WheelResult};

/// Prize list used on first start, without stored data, and on reset.
pub fn default_items() -> Vec<WheelItem> {
    vec![
        WheelItem::new("iPhone 15", 1.0, "#FF6B6B"),
        WheelItem::new("AirPods Pro", 1.0, "#4ECDC4"),
        WheelItem::new("Coffee voucher", 1.0, "#45B7D1"),
        WheelItem::new("10% coupon", 1.0, "#96CEB4"),
        WheelItem::new("20% coupon", 1.0, "#FFEAA7"),
        WheelItem::new("No prize", 1.0, "#DDA0DD"),
    ]
}

/// How segment angles are derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Weighted,
    Manual,
}

/// A spinnable wheel of weighted outcomes.
pub struct Wheel {
    items: Vec<WheelItem>,
    segments: Vec<Segment>,
    layout: Layout,
    engine: SpinEngine,
    editor: BoundaryEditor,
}

impl Default for Wheel {
    fn default() -> Self {
        let items = default_items();
        let segments = allocate(&items).unwrap_or_default();
        Self {
            items,
            segments,
            layout: Layout::Weighted,
            engine: SpinEngine::new(),
            editor: BoundaryEditor::new(),
        }
    }
}

impl Wheel {
    /// Builds a wheel from items; every weight must be finite and > 0.
    pub fn from_items(items: Vec<WheelItem>) -> WheelResult<Self> {
        let segments = allocate(&items)?;
        Ok(Self {
            items,
            segments,
            layout: Layout::Weighted,
            engine: SpinEngine::new(),
            editor: BoundaryEditor::new(),
        })
    }

    /// Builds from stored items, falling back to the defaults when nothing
    /// was stored.
    pub fn from_stored(items: Option<Vec<WheelItem>>) -> WheelResult<Self> {
        match items {
            Some(items) => Self::from_items(items),
            None => Ok(Self::default()),
        }
    }

    /// Replaces the spin settings.
    pub fn with_config(mut self, config: SpinConfig) -> WheelResult<Self> {
        self.engine.set_config(config)?;
        Ok(self)
    }

    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    /// Current segments, ordered by start angle.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn engine(&self) -> &SpinEngine {
        &self.engine
    }

    pub fn config(&self) -> &SpinConfig {
        self.engine.config()
    }

    pub fn phase(&self) -> SpinPhase {
        self.engine.phase()
    }

    pub fn current_rotation(&self) -> f64 {
        self.engine.current_rotation()
    }

    /// Updates the early-stop settle duration.
    pub fn set_stop_duration_ms(&mut self, stop_duration_ms: f64) -> WheelResult<()> {
        let config = SpinConfig {
            stop_duration_ms,
            ..self.engine.config().clone()
        };
        self.engine.set_config(config)
    }

    /// Wheel angle currently under the pointer.
    pub fn pointer_angle(&self) -> f64 {
        self.engine.pointer_angle()
    }

    /// Segment currently under the pointer, including mid-spin.
    pub fn pointer_segment(&self) -> Option<&Segment> {
        resolve(self.pointer_angle(), &self.segments)
    }

    /// Appends an item and re-allocates.
    ///
    /// In the manual layout the existing weights are span widths in degrees,
    /// so the new weight is measured against those; the result is a gap-free
    /// weighted layout.
    pub fn add_item(&mut self, item: WheelItem) -> WheelResult<usize> {
        self.ensure_idle()?;
        let mut items = self.items.clone();
        items.push(item);
        self.reallocate(items)?;
        Ok(self.items.len() - 1)
    }

    /// Removes an item and re-allocates.
    pub fn remove_item(&mut self, index: usize) -> WheelResult<WheelItem> {
        self.ensure_idle()?;
        self.check_index(index)?;
        let mut items = self.items.clone();
        let removed = items.remove(index);
        self.reallocate(items)?;
        Ok(removed)
    }

    /// Replaces an item and re-allocates.
    ///
    /// In the manual layout an edit that keeps the weight only renames or
    /// recolors the segment; the edited geometry stays as it is.
    pub fn update_item(&mut self, index: usize, item: WheelItem) -> WheelResult<()> {
        self.ensure_idle()?;
        self.check_index(index)?;
        if self.layout == Layout::Manual && item.weight == self.items[index].weight {
            let segment = &mut self.segments[index];
            segment.name = item.name.clone();
            segment.color = item.color.clone();
            self.items[index] = item;
            return Ok(());
        }
        let mut items = self.items.clone();
        items[index] = item;
        self.reallocate(items)
    }

    /// Changes one weight and re-allocates.
    ///
    /// In the manual layout the other weights are span widths in degrees.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> WheelResult<()> {
        self.check_index(index)?;
        let item = WheelItem {
            weight,
            ..self.items[index].clone()
        };
        self.update_item(index, item)
    }

    /// Restores the default prize list.
    pub fn reset_to_default(&mut self) -> WheelResult<()> {
        self.ensure_idle()?;
        self.reallocate(default_items())
    }

    /// Inserts an item at explicit whole-degree angles, switching to the
    /// manual layout.
    pub fn place_item(
        &mut self,
        name: impl Into<String>,
        start_deg: f64,
        end_deg: f64,
        color: impl Into<Color>,
    ) -> WheelResult<usize> {
        self.ensure_idle()?;
        let idx = place_span(&mut self.segments, name, start_deg, end_deg, color)?;
        self.enter_manual_layout();
        Ok(idx)
    }

    /// Starts a spin; see [`SpinEngine::start_spin`].
    pub fn start_spin(
        &mut self,
        source: &mut dyn RandomSource,
        now_ms: f64,
    ) -> WheelResult<SpinPlan> {
        let plan = self.engine.start_spin(&self.segments, source, now_ms)?;
        self.editor.end_drag();
        Ok(plan)
    }

    pub fn stop_early(&mut self, now_ms: f64) -> WheelResult<()> {
        self.engine.stop_early(now_ms)
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        self.engine.tick(now_ms, &self.segments)
    }

    pub fn abort(&mut self) -> bool {
        self.engine.abort()
    }

    /// Runs one spin to completion against a frame source.
    pub fn simulate<F: FrameSource>(
        &mut self,
        source: &mut dyn RandomSource,
        frames: &mut F,
        options: &SimulateOptions,
    ) -> WheelResult<SpinRun> {
        self.editor.end_drag();
        simulate_spin(&mut self.engine, &self.segments, source, frames, options)
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.editor.drag()
    }

    /// Starts dragging a boundary.
    pub fn begin_drag(&mut self, item_index: usize, kind: BoundaryKind) -> WheelResult<()> {
        self.ensure_idle()?;
        self.editor.begin_drag(item_index, kind, &self.segments)
    }

    /// Starts a drag at the boundary under a canvas point, if there is one.
    pub fn begin_drag_at(
        &mut self,
        geometry: &WheelGeometry,
        x: f64,
        y: f64,
    ) -> WheelResult<bool> {
        self.ensure_idle()?;
        let rotation = self.current_rotation();
        match geometry.boundary_at(x, y, rotation, &self.segments) {
            Some((idx, kind)) => {
                self.editor.begin_drag(idx, kind, &self.segments)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves the dragged boundary; returns whether it moved.
    pub fn update_drag(&mut self, proposed_deg: f64) -> bool {
        if self.engine.phase().is_active() {
            return false;
        }
        let moved = self.editor.update_drag(proposed_deg, &mut self.segments);
        if moved {
            self.enter_manual_layout();
        }
        moved
    }

    /// Moves the dragged boundary to the wheel angle under a canvas point.
    pub fn update_drag_at(&mut self, geometry: &WheelGeometry, x: f64, y: f64) -> bool {
        let angle = geometry.wheel_angle_at(x, y, self.current_rotation());
        self.update_drag(angle)
    }

    pub fn end_drag(&mut self) -> Option<DragState> {
        self.editor.end_drag()
    }

    fn reallocate(&mut self, items: Vec<WheelItem>) -> WheelResult<()> {
        let segments = allocate(&items)?;
        self.editor.end_drag();
        self.items = items;
        self.segments = segments;
        self.layout = Layout::Weighted;
        Ok(())
    }

    fn enter_manual_layout(&mut self) {
        self.items = self.segments.iter().map(Segment::to_item).collect();
        self.layout = Layout::Manual;
    }

    fn ensure_idle(&self) -> WheelResult<()> {
        if self.engine.phase().is_active() {
            return Err(WheelError::WheelBusy);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> WheelResult<()> {
        if index >= self.items.len() {
            return Err(WheelError::ItemOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}
