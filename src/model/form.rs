//! FormRecord - the field values collected across wizard steps

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered map of field name to field value
///
/// Serialized as a JSON object with keys in insertion order. Non-string
/// JSON values in a stored record are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormRecord {
    fields: Vec<(String, String)>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record the product wizard starts from
    pub fn with_defaults() -> Self {
        let mut record = Self::new();
        record.set("productType", "Product");
        record.set("category", "Clothing");
        record
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name` if present and non-empty
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Insert or overwrite a field, keeping its original position
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// True when the field is missing or only whitespace
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).map(|v| v.trim().is_empty()).unwrap_or(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = FormRecord::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct FormRecordVisitor;

impl<'de> Visitor<'de> for FormRecordVisitor {
    type Value = FormRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object of field values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FormRecord, A::Error> {
        let mut record = FormRecord::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            record.set(key, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for FormRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FormRecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = FormRecord::with_defaults();
        assert_eq!(record.get("productType"), Some("Product"));
        assert_eq!(record.get("category"), Some("Clothing"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut record = FormRecord::with_defaults();
        record.set("name", "QuickClean");
        record.set("productType", "Service");

        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["productType", "category", "name"]);
        assert_eq!(record.get("productType"), Some("Service"));
    }

    #[test]
    fn test_blank_detection() {
        let mut record = FormRecord::new();
        assert!(record.is_blank("name"));
        record.set("name", "   ");
        assert!(record.is_blank("name"));
        record.set("name", " x ");
        assert!(!record.is_blank("name"));
    }

    #[test]
    fn test_json_keeps_insertion_order() {
        let mut record = FormRecord::new();
        record.set("zeta", "1");
        record.set("alpha", "2");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);

        let back: FormRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        let record: FormRecord =
            serde_json::from_str(r#"{"ageMin":18,"name":"x","gone":null}"#).unwrap();
        assert_eq!(record.get("ageMin"), Some("18"));
        assert_eq!(record.get("gone"), None);
    }
}
