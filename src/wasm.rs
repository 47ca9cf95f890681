use wasm_bindgen::prelude::*;

use crate::text::{text_height, TextHeightParams};

#[wasm_bindgen]
pub fn compose(json: &str) -> Result<JsValue, JsValue> {
    let rendering = crate::compose_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&rendering).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = textHeight)]
pub fn estimate_text_height(params: JsValue) -> Result<f64, JsValue> {
    let params: TextHeightParams =
        serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(text_height(&params))
}
