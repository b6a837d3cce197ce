//! WebAssembly bindings for the browser search client.
//!
//! The page fetches `search-index.bin` itself (it knows the base URL) and
//! hands the bytes to [`DocseekSearcher`]. From then on every keystroke is a
//! synchronous call into the same query engine the CLI uses.

use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::binary::decode_index;
use crate::search::{search_with_options, SearchOptions};
use crate::types::SearchIndex;

/// WASM-accessible searcher over a decoded index.
#[wasm_bindgen]
pub struct DocseekSearcher {
    index: SearchIndex,
}

#[wasm_bindgen]
impl DocseekSearcher {
    /// Decode an index from its binary (or JSON) bytes.
    ///
    /// Throws with the decoder's message when the bytes are not a valid index;
    /// the client is expected to disable search in that case.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<DocseekSearcher, JsValue> {
        let index = decode_index(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(DocseekSearcher { index })
    }

    /// Ranked results for `query`, as an array of
    /// `{ id, title, url, score, matches, snippet }`.
    ///
    /// `options` may carry `limit`, `prefix` and `threshold`; missing fields
    /// take their defaults.
    #[wasm_bindgen]
    pub fn search(&self, query: &str, options: Option<JsValue>) -> Result<JsValue, JsValue> {
        let options: SearchOptions = match options {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            _ => SearchOptions::default(),
        };
        let results = search_with_options(&self.index, query, &options);
        to_value(&results).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = docCount)]
    pub fn doc_count(&self) -> usize {
        self.index.doc_count
    }

    #[wasm_bindgen(js_name = termCount)]
    pub fn term_count(&self) -> usize {
        self.index.term_count()
    }
}
