//! Clipboard
//!
//! Async Clipboard API binding for copying the shopping list.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    async fn write_text_js(text: &str) -> Result<JsValue, JsValue>;
}

/// Write plain text to the system clipboard
pub async fn write_text(text: &str) -> Result<(), String> {
    write_text_js(text)
        .await
        .map(|_| ())
        .map_err(|e| format!("Clipboard write failed: {:?}", e))
}
