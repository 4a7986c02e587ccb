use std::{collections::BTreeMap, sync::LazyLock};

use serde::Deserialize;

use crate::{Error, Result};

static SCHEMA_YAML: &str = include_str!("schema.yaml");

static PARSER: LazyLock<Result<Parser, String>> =
    LazyLock::new(|| Parser::new(SCHEMA_YAML).map_err(|e| e.to_string()));

/// The type registry for every type this crate builds apply configurations for.
pub fn parser() -> Result<&'static Parser> {
    PARSER.as_ref().map_err(|e| Error::SchemaError(e.clone()))
}

#[derive(Deserialize)]
struct SchemaDocument {
    types: Vec<TypeDef>,
}

#[derive(Deserialize)]
struct TypeDef {
    name: String,
    #[serde(flatten)]
    atom: Atom,
}

/// Exactly one of `scalar`, `list` or `map` describes a type.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Atom {
    pub scalar: Option<Scalar>,
    pub list: Option<Box<List>>,
    pub map: Option<Box<MapType>>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    String,
    Numeric,
    Boolean,
    Untyped,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ElementRelationship {
    Atomic,
    Separable,
    Associative,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub element_type: TypeRef,
    pub element_relationship: Option<ElementRelationship>,
    #[serde(default)]
    pub keys: Vec<String>,
}

impl List {
    /// Lists are atomic unless declared associative.
    pub fn is_associative(&self) -> bool {
        self.element_relationship == Some(ElementRelationship::Associative)
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapType {
    #[serde(default)]
    pub fields: Vec<StructField>,
    pub element_type: Option<TypeRef>,
    pub element_relationship: Option<ElementRelationship>,
}

impl MapType {
    pub fn is_atomic(&self) -> bool {
        self.element_relationship == Some(ElementRelationship::Atomic)
    }

    /// Declared field type, falling back to the element type of string maps.
    pub fn field_type(&self, name: &str) -> Option<&TypeRef> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.type_)
            .or(self.element_type.as_ref())
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: TypeRef,
}

/// Either a reference to a named type or an inline atom.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub named_type: Option<String>,
    #[serde(flatten)]
    pub inlined: Atom,
}

#[derive(Debug)]
pub struct Parser {
    types: BTreeMap<String, Atom>,
}

impl Parser {
    /// Parses a schema in structured-merge-diff YAML layout and checks that every
    /// named reference resolves.
    pub fn new(yaml: &str) -> Result<Self> {
        let doc: SchemaDocument =
            serde_yaml::from_str(yaml).map_err(|e| Error::SchemaError(e.to_string()))?;
        let mut types = BTreeMap::new();
        for def in doc.types {
            if types.insert(def.name.clone(), def.atom).is_some() {
                return Err(Error::SchemaError(format!("type `{}` declared twice", def.name)));
            }
        }
        let parser = Parser { types };
        for (name, atom) in &parser.types {
            parser
                .check_atom(atom)
                .map_err(|reason| Error::SchemaError(format!("type `{name}`: {reason}")))?;
        }
        Ok(parser)
    }

    pub fn type_(&self, name: &str) -> Result<ParseableType<'_>> {
        let (name, atom) = self
            .types
            .get_key_value(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        Ok(ParseableType {
            name,
            parser: self,
            atom,
        })
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub(crate) fn resolve<'a>(&'a self, tr: &'a TypeRef) -> Result<&'a Atom> {
        match &tr.named_type {
            Some(name) => self
                .types
                .get(name)
                .ok_or_else(|| Error::UnknownType(name.clone())),
            None => Ok(&tr.inlined),
        }
    }

    fn check_atom(&self, atom: &Atom) -> Result<(), String> {
        let kinds = [atom.scalar.is_some(), atom.list.is_some(), atom.map.is_some()]
            .iter()
            .filter(|set| **set)
            .count();
        if kinds != 1 {
            return Err(format!("expected exactly one of scalar, list, map; found {kinds}"));
        }
        if let Some(list) = &atom.list {
            if !list.keys.is_empty() && !list.is_associative() {
                return Err("list keys require an associative list".to_string());
            }
            self.check_ref(&list.element_type)?;
        }
        if let Some(map) = &atom.map {
            for field in &map.fields {
                self.check_ref(&field.type_)
                    .map_err(|reason| format!("field `{}`: {reason}", field.name))?;
            }
            if let Some(element_type) = &map.element_type {
                self.check_ref(element_type)?;
            }
        }
        Ok(())
    }

    fn check_ref(&self, tr: &TypeRef) -> Result<(), String> {
        match &tr.named_type {
            Some(name) if self.types.contains_key(name) => Ok(()),
            Some(name) => Err(format!("unknown named type `{name}`")),
            None => self.check_atom(&tr.inlined),
        }
    }
}

/// A named type of a [`Parser`], ready to walk values with.
#[derive(Clone, Copy, Debug)]
pub struct ParseableType<'a> {
    pub name: &'a str,
    pub(crate) parser: &'a Parser,
    pub(crate) atom: &'a Atom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_schema_parses() {
        let parser = parser().expect("embedded schema");
        assert!(parser.type_names().any(|n| n == "io.k8s.api.events.v1beta1.Event"));
        let event = parser.type_("io.k8s.api.events.v1beta1.Event").unwrap();
        let map = event.atom.map.as_ref().expect("Event is a map");
        assert!(map.field_type("reason").is_some());
        assert!(map.field_type("spec").is_none());
    }

    #[test]
    fn object_meta_lists_are_associative() {
        let parser = parser().unwrap();
        let meta = parser
            .type_("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta")
            .unwrap();
        let map = meta.atom.map.as_ref().unwrap();
        let refs = parser.resolve(map.field_type("ownerReferences").unwrap()).unwrap();
        let list = refs.list.as_ref().unwrap();
        assert!(list.is_associative());
        assert_eq!(list.keys, vec!["uid"]);
        let labels = parser.resolve(map.field_type("labels").unwrap()).unwrap();
        // any key of a string map resolves to the element type
        let labels = labels.map.as_ref().unwrap();
        assert_eq!(
            labels.field_type("app.kubernetes.io/name").and_then(|t| t.inlined.scalar),
            Some(Scalar::String)
        );
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = parser().unwrap().type_("io.k8s.api.core.v1.Pod").unwrap_err();
        assert!(matches!(err, Error::UnknownType(name) if name == "io.k8s.api.core.v1.Pod"));
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let yaml = r#"
types:
- name: a
  map:
    fields:
    - name: b
      type:
        namedType: missing
"#;
        assert!(matches!(Parser::new(yaml), Err(Error::SchemaError(_))));
    }

    #[test]
    fn ambiguous_atom_is_rejected() {
        let yaml = r#"
types:
- name: a
  scalar: string
  map:
    fields: []
"#;
        assert!(matches!(Parser::new(yaml), Err(Error::SchemaError(_))));
    }
}
