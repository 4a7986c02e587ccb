use std::fmt;

use serde_json::{Map, Value};

/// One step of a field path, in the form used by `FieldsV1` keys.
#[derive(Clone, Debug, PartialEq)]
pub enum PathElement {
    /// `f:<name>`: a struct field or a map key.
    Field(String),
    /// `k:<json object>`: an associative list item, selected by its key fields.
    Key(Map<String, Value>),
    /// `v:<json>`: a set item, selected by its value.
    Value(Value),
    /// `i:<n>`: a list item selected by position.
    Index(usize),
}

impl PathElement {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (prefix, rest) = raw
            .split_once(':')
            .ok_or_else(|| format!("path element `{raw}` has no type prefix"))?;
        match prefix {
            "f" => Ok(PathElement::Field(rest.to_string())),
            "k" => match serde_json::from_str::<Value>(rest) {
                Ok(Value::Object(keys)) => Ok(PathElement::Key(keys)),
                Ok(_) => Err(format!("key `{rest}` is not a JSON object")),
                Err(e) => Err(format!("key `{rest}` is not valid JSON: {e}")),
            },
            "v" => serde_json::from_str(rest)
                .map(PathElement::Value)
                .map_err(|e| format!("value `{rest}` is not valid JSON: {e}")),
            "i" => rest
                .parse()
                .map(PathElement::Index)
                .map_err(|_| format!("index `{rest}` is not a non-negative integer")),
            _ => Err(format!("unknown path element prefix `{prefix}` in `{raw}`")),
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Field(name) => write!(f, ".{name}"),
            PathElement::Key(keys) => write!(f, "[k:{}]", Value::Object(keys.clone())),
            PathElement::Value(value) => write!(f, "[v:{value}]"),
            PathElement::Index(i) => write!(f, "[i:{i}]"),
        }
    }
}

/// A set of field paths, stored as a tree: `members` end at this level,
/// `children` continue below it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Set {
    pub members: Vec<PathElement>,
    pub children: Vec<(PathElement, Set)>,
}

impl Set {
    /// Decodes the `fieldsV1` payload of a managedFields entry.
    pub fn from_fields_v1(raw: &Value) -> Result<Self, String> {
        let Value::Object(entries) = raw else {
            return Err("fieldsV1 is not a JSON object".to_string());
        };
        Self::decode(entries).map(|(set, _)| set)
    }

    // Returns the decoded set and whether a "." entry marked the parent path itself.
    fn decode(entries: &Map<String, Value>) -> Result<(Self, bool), String> {
        let mut set = Set::default();
        let mut is_member = false;
        for (key, value) in entries {
            if key == "." {
                is_member = true;
                continue;
            }
            let pe = PathElement::parse(key)?;
            let Value::Object(sub) = value else {
                return Err(format!("entry `{key}` is not a JSON object"));
            };
            if sub.is_empty() {
                set.members.push(pe);
                continue;
            }
            let (child, child_is_member) = Self::decode(sub)?;
            if child_is_member {
                set.members.push(pe.clone());
            }
            if !child.is_empty() {
                set.children.push((pe, child));
            }
        }
        Ok((set, is_member))
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.children.iter().all(|(_, c)| c.is_empty())
    }

    pub fn has(&self, pe: &PathElement) -> bool {
        self.members.contains(pe)
    }

    pub fn child(&self, pe: &PathElement) -> Option<&Set> {
        self.children.iter().find(|(p, _)| p == pe).map(|(_, c)| c)
    }

    /// Every path element addressed at this level, members and children alike.
    pub fn elements(&self) -> impl Iterator<Item = &PathElement> {
        self.members
            .iter()
            .chain(self.children.iter().map(|(pe, _)| pe))
    }

    /// Keeps only the leaf paths: a member that also has children is dropped
    /// in favour of its children.
    pub fn leaves(&self) -> Set {
        Set {
            members: self
                .members
                .iter()
                .filter(|m| self.child(m).is_none())
                .cloned()
                .collect(),
            children: self
                .children
                .iter()
                .map(|(pe, c)| (pe.clone(), c.leaves()))
                .collect(),
        }
    }

    /// Number of leaf paths in the set.
    pub fn leaf_count(&self) -> usize {
        let members = self.members.iter().filter(|m| self.child(m).is_none()).count();
        members + self.children.iter().map(|(_, c)| c.leaf_count()).sum::<usize>()
    }
}
