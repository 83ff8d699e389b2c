//! Browser bindings. The page draws the board and owns storage; it forwards
//! clicks (pixel coordinates divided by the cell size) and button presses here.

use std::fmt::Display;

use wasm_bindgen::prelude::*;

use crate::game::GameEngine;
use crate::snapshot::MemorySlot;

#[wasm_bindgen]
pub struct WasmGame {
    engine: GameEngine,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            engine: GameEngine::new(Box::new(MemorySlot::default())),
        }
    }

    #[wasm_bindgen(js_name = stageCell)]
    pub fn stage_cell(&mut self, row: u8, col: u8) -> Result<(), JsValue> {
        self.engine.stage_cell(row, col).map_err(to_js_error)
    }

    /// Returns the flipped positions as a JS array.
    #[wasm_bindgen(js_name = commitTurn)]
    pub fn commit_turn(&mut self) -> Result<JsValue, JsValue> {
        let flipped = self.engine.commit_turn().map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&flipped)?)
    }

    /// Returns `false` when nothing was staged.
    #[wasm_bindgen(js_name = undoLastStaged)]
    pub fn undo_last_staged(&mut self) -> bool {
        self.engine.undo_last_staged().is_some()
    }

    #[wasm_bindgen(js_name = skipTurn)]
    pub fn skip_turn(&mut self) {
        self.engine.skip_turn();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn save(&mut self) -> Result<(), JsValue> {
        self.engine.save().map_err(to_js_error)
    }

    pub fn load(&mut self) -> Result<(), JsValue> {
        self.engine.load().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = exportSnapshot)]
    pub fn export_snapshot(&self) -> String {
        self.engine.snapshot().to_string()
    }

    #[wasm_bindgen(js_name = importSnapshot)]
    pub fn import_snapshot(&mut self, text: &str) -> Result<(), JsValue> {
        self.engine.restore(text).map_err(to_js_error)
    }

    /// 0=empty, 1=black, 2=white; `undefined` off the board.
    #[wasm_bindgen(js_name = getCell)]
    pub fn get_cell(&self, row: u8, col: u8) -> Option<u8> {
        self.engine.cell(row, col).map(|cell| cell as u8)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.to_game_state())?)
    }

    #[wasm_bindgen(js_name = getResult)]
    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.to_game_result())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.legal_moves())?)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
