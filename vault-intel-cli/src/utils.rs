use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use vault_intel::VaultIntelError;
use vault_intel::models::Item;

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsInput {
    Many(Vec<Item>),
    One(Item),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> vault_intel::Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        VaultIntelError::Other(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        VaultIntelError::Other(format!("Invalid item JSON in '{}': {}", path.display(), e))
    })
}

/// Read a file holding either one item or an array of items.
pub fn read_items(path: &Path) -> vault_intel::Result<Vec<Item>> {
    match read_json(path)? {
        ItemsInput::Many(items) => Ok(items),
        ItemsInput::One(item) => Ok(vec![item]),
    }
}

/// Read a file holding exactly one item.
pub fn read_item(path: &Path) -> vault_intel::Result<Item> {
    match read_json(path)? {
        ItemsInput::One(item) => Ok(item),
        ItemsInput::Many(mut items) if items.len() == 1 => Ok(items.remove(0)),
        ItemsInput::Many(items) => Err(VaultIntelError::Other(format!(
            "Expected a single item in '{}', found {}",
            path.display(),
            items.len()
        ))),
    }
}

/// Read a JSON object mapping collection ids to item arrays.
pub fn read_items_by_database(path: &Path) -> vault_intel::Result<BTreeMap<String, Vec<Item>>> {
    read_json(path)
}
