//! Printlayout WASM - WebAssembly bindings for the print-layout engine
//!
//! This crate exposes printlayout-core to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `layout` - the `PrintLayout` class (plan, place, render)
//! - `types` - request objects accepted from JavaScript
//! - `logger` - forwards `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { PrintLayout, setLogLevel } from '@printlayout/wasm';
//!
//! await init();
//! setLogLevel('debug');
//!
//! const layout = new PrintLayout();
//! const plan = layout.plan({ paper: 'A4', item: '35x45mm' });
//! console.log(`${plan.rows} x ${plan.columns}`);
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod layout;
mod logger;
mod types;

pub use layout::PrintLayout;
pub use types::{JsGenerateRequest, JsRenderOptions, JsSheetRequest};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Change console log verbosity: `off`, `error`, `warn`, `info`, `debug`, `trace`.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logger::install(filter);
    Ok(())
}
