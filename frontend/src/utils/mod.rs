pub mod api;
pub mod can;
pub mod screen_block;
pub mod spinner;

use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GlobalError {
    #[error("window.{0} is not defined")]
    Missing(String),
    #[error("window.{0} is malformed: {1}")]
    Malformed(String, String),
}

/// Reads a value the host page put on `window` before mounting the app.
pub fn window_global<T: DeserializeOwned>(name: &str) -> Result<T, GlobalError> {
    let window = leptos::prelude::window();
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .map_err(|_| GlobalError::Missing(name.to_string()))?;
    if value.is_undefined() || value.is_null() {
        return Err(GlobalError::Missing(name.to_string()));
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| GlobalError::Malformed(name.to_string(), e.to_string()))
}

/// Escapes a value for use inside a query string.
pub fn encode_query(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

pub fn bytes_to_string(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
