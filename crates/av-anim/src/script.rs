//! Script driver: records the instruction stream instead of rendering it

use crate::driver::{AnimationDriver, ViewId};
use crate::layout::HeapLayout;
use av_data::CellValue;
use serde::Serialize;

/// One recorded driver instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AnimationInstruction {
    CreateArrayView { view: ViewId, values: Vec<CellValue> },
    CreateTreeView { view: ViewId, node_count: usize },
    AddHighlight { view: ViewId, positions: Vec<usize> },
    RemoveHighlight { view: ViewId, positions: Vec<usize> },
    SetValue { view: ViewId, position: usize, value: CellValue },
    DisplayInit,
    Step,
    Recorded,
    SetSpeed { speed: f64 },
}

/// Driver implementation that records every instruction
///
/// The recorded script is the deterministic reference output of the
/// converter; a graphical backend replays the same stream.
#[derive(Debug, Default)]
pub struct ScriptDriver {
    instructions: Vec<AnimationInstruction>,
}

impl ScriptDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[AnimationInstruction] {
        &self.instructions
    }

    pub fn into_script(self) -> Vec<AnimationInstruction> {
        self.instructions
    }
}

impl AnimationDriver for ScriptDriver {
    fn create_array_view(&mut self, values: &[CellValue]) -> ViewId {
        let view = ViewId::new_v4();
        self.instructions.push(AnimationInstruction::CreateArrayView {
            view,
            values: values.to_vec(),
        });
        view
    }

    fn create_tree_view(&mut self, layout: &HeapLayout) -> ViewId {
        let view = ViewId::new_v4();
        self.instructions.push(AnimationInstruction::CreateTreeView {
            view,
            node_count: layout.len(),
        });
        view
    }

    fn add_highlight(&mut self, view: ViewId, positions: &[usize]) {
        self.instructions.push(AnimationInstruction::AddHighlight {
            view,
            positions: positions.to_vec(),
        });
    }

    fn remove_highlight(&mut self, view: ViewId, positions: &[usize]) {
        self.instructions.push(AnimationInstruction::RemoveHighlight {
            view,
            positions: positions.to_vec(),
        });
    }

    fn set_value(&mut self, view: ViewId, position: usize, value: CellValue) {
        self.instructions.push(AnimationInstruction::SetValue {
            view,
            position,
            value,
        });
    }

    fn display_init(&mut self) {
        self.instructions.push(AnimationInstruction::DisplayInit);
    }

    fn step(&mut self) {
        self.instructions.push(AnimationInstruction::Step);
    }

    fn recorded(&mut self) {
        self.instructions.push(AnimationInstruction::Recorded);
    }

    fn set_speed(&mut self, speed: f64) {
        self.instructions.push(AnimationInstruction::SetSpeed { speed });
    }
}

/// Cursor over a recorded script, for stepping forward and backward
///
/// Positions count the discrete states delimited by step boundaries;
/// position 0 is the initial display.
#[derive(Debug)]
pub struct ScriptCursor {
    script: Vec<AnimationInstruction>,
    position: usize,
}

impl ScriptCursor {
    pub fn new(script: Vec<AnimationInstruction>) -> Self {
        Self { script, position: 0 }
    }

    pub fn script(&self) -> &[AnimationInstruction] {
        &self.script
    }

    /// Number of discrete states in the script
    pub fn step_count(&self) -> usize {
        let boundaries = self
            .script
            .iter()
            .filter(|i| matches!(i, AnimationInstruction::Step))
            .count();
        boundaries + 1
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance one step; `false` when already at the end
    pub fn step_forward(&mut self) -> bool {
        if self.position + 1 < self.step_count() {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step; `false` when already at the start
    pub fn step_backward(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Rewind to the initial display
    pub fn jump_to_start(&mut self) {
        self.position = 0;
    }

    /// Fast-forward to the final state
    pub fn jump_to_end(&mut self) {
        self.position = self.step_count() - 1;
    }
}
