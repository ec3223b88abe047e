use wasm_bindgen::prelude::*;

use inlinemark::config::parse_config_str;

/// Parse one inline span and return the indented node outline.
///
/// `definitions` is optional TOML with a `[references]` table, the same
/// shape as the CLI config file.
#[wasm_bindgen]
pub fn parse_inline(input: &str, definitions: Option<String>) -> Result<String, JsError> {
    let cfg = match definitions {
        Some(toml) => parse_config_str(&toml, std::path::Path::new("<definitions>"))?,
        None => Default::default(),
    };
    let tree = inlinemark::parse_with(input, &cfg.definitions(), cfg.parse_options());
    Ok(inlinemark::dump(&tree, input))
}

#[wasm_bindgen]
pub fn syntax_tree_debug(input: &str) -> String {
    let tree = inlinemark::parse(input, &inlinemark::DefinitionTable::new());
    format!("{:#?}", inlinemark::build_syntax_tree(input, &tree))
}
