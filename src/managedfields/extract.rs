use serde_json::{Map, Value};

use super::{
    fieldpath::{PathElement, Set},
    schema::{Atom, List, MapType, ParseableType, Parser},
};
use crate::{Error, Result};

impl ParseableType<'_> {
    /// Copies out of `value` the items addressed by `set`, which must already be
    /// reduced to its leaves.
    ///
    /// A member copies the whole value at its path, a child recurses. Owned paths
    /// that are missing from `value` are skipped but still checked against the
    /// schema. Atomic maps and lists are copied whole.
    pub fn extract_items(&self, value: &Value, set: &Set) -> Result<Value> {
        let walker = Walker {
            parser: self.parser,
        };
        let extracted = walker.walk(self.atom, Some(value), set, &mut String::new())?;
        Ok(extracted.unwrap_or_else(|| Value::Object(Map::new())))
    }
}

struct Walker<'a> {
    parser: &'a Parser,
}

impl Walker<'_> {
    fn walk(
        &self,
        atom: &Atom,
        value: Option<&Value>,
        set: &Set,
        path: &mut String,
    ) -> Result<Option<Value>> {
        if let Some(map) = &atom.map {
            self.walk_map(map, value, set, path)
        } else if let Some(list) = &atom.list {
            self.walk_list(list, value, set, path)
        } else {
            Err(field_path_error(path, "cannot descend into a scalar"))
        }
    }

    fn walk_map(
        &self,
        map: &MapType,
        value: Option<&Value>,
        set: &Set,
        path: &mut String,
    ) -> Result<Option<Value>> {
        let object = match value {
            None | Some(Value::Null) => None,
            Some(Value::Object(object)) => Some(object),
            Some(other) => {
                return Err(field_path_error(
                    path,
                    &format!("expected an object, found {}", json_type(other)),
                ));
            }
        };
        if map.is_atomic() {
            return Ok(object.map(|o| Value::Object(o.clone())));
        }

        let mut out = Map::new();
        for pe in set.elements() {
            let len = path.len();
            path.push_str(&pe.to_string());
            let PathElement::Field(name) = pe else {
                return Err(field_path_error(path, "only field names address a map"));
            };
            let field_type = map
                .field_type(name)
                .ok_or_else(|| field_path_error(path, "field is not declared in the schema"))?;
            let field_atom = self.parser.resolve(field_type)?;
            let field_value = object.and_then(|o| o.get(name)).filter(|v| !v.is_null());

            if set.has(pe) {
                if let Some(v) = field_value {
                    out.insert(name.clone(), v.clone());
                }
            } else if let Some(child) = set.child(pe) {
                if let Some(v) = self.walk(field_atom, field_value, child, path)? {
                    out.insert(name.clone(), v);
                }
            }
            path.truncate(len);
        }
        // owned paths that all turned out absent leave no trace of their parent
        if out.is_empty() {
            return Ok(None);
        }
        Ok(object.map(|_| Value::Object(out)))
    }

    fn walk_list(
        &self,
        list: &List,
        value: Option<&Value>,
        set: &Set,
        path: &mut String,
    ) -> Result<Option<Value>> {
        let items = match value {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                return Err(field_path_error(
                    path,
                    &format!("expected a list, found {}", json_type(other)),
                ));
            }
        };
        if !list.is_associative() {
            return Ok(items.map(|i| Value::Array(i.clone())));
        }
        let item_atom = self.parser.resolve(&list.element_type)?;

        let mut picked: Vec<(usize, Value)> = Vec::new();
        for pe in set.elements() {
            let len = path.len();
            path.push_str(&pe.to_string());
            check_list_element(list, pe, path)?;
            let found = items.and_then(|items| {
                items
                    .iter()
                    .enumerate()
                    .find(|(i, item)| item_matches(pe, *i, item))
            });

            if set.has(pe) {
                if let Some((i, item)) = found {
                    picked.push((i, item.clone()));
                }
            } else if let Some(child) = set.child(pe) {
                let extracted = self.walk(item_atom, found.map(|(_, item)| item), child, path)?;
                if let (Some((i, _)), Some(item)) = (found, extracted) {
                    picked.push((i, item));
                }
            }
            path.truncate(len);
        }
        if picked.is_empty() {
            return Ok(None);
        }
        // keep the live object's item order, one copy per item
        picked.sort_by_key(|(i, _)| *i);
        picked.dedup_by_key(|(i, _)| *i);
        Ok(items.map(|_| Value::Array(picked.into_iter().map(|(_, v)| v).collect())))
    }
}

fn check_list_element(list: &List, pe: &PathElement, path: &str) -> Result<()> {
    match pe {
        PathElement::Key(keys) => {
            if list.keys.is_empty() {
                return Err(field_path_error(path, "list is not keyed"));
            }
            if let Some(missing) = list.keys.iter().find(|k| !keys.contains_key(*k)) {
                return Err(field_path_error(path, &format!("key is missing `{missing}`")));
            }
            Ok(())
        }
        PathElement::Value(_) if !list.keys.is_empty() => {
            Err(field_path_error(path, "keyed list items cannot be addressed by value"))
        }
        PathElement::Field(_) => Err(field_path_error(path, "field names cannot address a list")),
        PathElement::Value(_) | PathElement::Index(_) => Ok(()),
    }
}

fn item_matches(pe: &PathElement, index: usize, item: &Value) -> bool {
    match pe {
        PathElement::Key(keys) => keys.iter().all(|(k, v)| item.get(k) == Some(v)),
        PathElement::Value(v) => item == v,
        PathElement::Index(i) => *i == index,
        PathElement::Field(_) => false,
    }
}

fn field_path_error(path: &str, reason: &str) -> Error {
    Error::FieldPath {
        path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
        reason: reason.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
