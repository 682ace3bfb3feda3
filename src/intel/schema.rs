//! Structural description of the response the model must produce.
//!
//! The same [`Schema`] value is sent to the completion service (as its
//! `responseSchema`) and used locally to check what comes back, so the two
//! can never drift apart.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Primitive type tags understood by the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// JSON object with named properties
    Object,
    /// JSON string
    String,
}

impl SchemaType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            SchemaType::Object => value.is_object(),
            SchemaType::String => value.is_string(),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A node of a response schema: a type, and for objects an ordered set of
/// named properties plus the names that must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    schema_type: SchemaType,
    properties: Vec<(String, Schema)>,
    required: Vec<String>,
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: Vec::new(),
            required: Vec::new(),
        }
    }

    /// An object schema with no properties yet.
    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    /// A string leaf.
    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// Adds an optional property. Declaration order is kept.
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    /// Adds a property and marks it required.
    pub fn with_required_property(self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        let mut this = self.with_property(name.clone(), schema);
        this.required.push(name);
        this
    }

    /// Type tag of this node.
    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.properties.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Names of required properties.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Checks `value` against this schema.
    ///
    /// Required properties must be present and non-null. Optional properties
    /// may be missing or `null`. Properties not declared are ignored. The
    /// error names the offending JSON path.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), String> {
        if !self.schema_type.matches(value) {
            return Err(format!(
                "{path}: expected {:?}, found {}",
                self.schema_type,
                describe(value)
            ));
        }

        let Some(object) = value.as_object() else {
            return Ok(());
        };

        for name in &self.required {
            match object.get(name) {
                None | Some(Value::Null) => {
                    return Err(format!("{path}: missing required field '{name}'"));
                }
                Some(_) => {}
            }
        }

        for (name, schema) in &self.properties {
            match object.get(name) {
                None | Some(Value::Null) => {}
                Some(child) => schema.validate_at(&format!("{path}.{name}"), child)?,
            }
        }

        Ok(())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let is_object = self.schema_type == SchemaType::Object && !self.properties.is_empty();
        let mut entries = 1;
        if is_object {
            entries += 2;
        }
        if !self.required.is_empty() {
            entries += 1;
        }

        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry("type", &self.schema_type)?;
        if is_object {
            map.serialize_entry("properties", &OrderedProperties(&self.properties))?;
            let ordering: Vec<&str> = self.properties.iter().map(|(n, _)| n.as_str()).collect();
            map.serialize_entry("propertyOrdering", &ordering)?;
        }
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        map.end()
    }
}

// serde_json::Map sorts keys; this keeps declaration order on the wire.
struct OrderedProperties<'a>(&'a [(String, Schema)]);

impl Serialize for OrderedProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

/// Top-level field holding the two-sentence description.
pub const FIELD_SUMMARY: &str = "summary";
/// Top-level network assignment section.
pub const FIELD_NETWORK_INFO: &str = "networkInfo";
/// Top-level geolocation section.
pub const FIELD_GEOGRAPHY: &str = "geography";
/// Top-level contacts section.
pub const FIELD_CONTACTS: &str = "contacts";

/// Leaves of the network assignment section.
pub const NETWORK_INFO_FIELDS: &[&str] = &[
    "name",
    "organization",
    "netRange",
    "cidr",
    "status",
    "registry",
];
/// Leaves of the geolocation section.
pub const GEOGRAPHY_FIELDS: &[&str] = &["country", "city", "coordinates"];
/// Leaves of the contacts section.
pub const CONTACT_FIELDS: &[&str] = &["abuse", "admin"];

fn string_section(fields: &[&str]) -> Schema {
    fields
        .iter()
        .fold(Schema::object(), |schema, field| {
            schema.with_property(*field, Schema::string())
        })
}

/// The schema every intelligence lookup response must satisfy.
///
/// The four sections are required; every leaf inside them is an optional
/// string.
pub fn lookup_response_schema() -> Schema {
    Schema::object()
        .with_required_property(FIELD_SUMMARY, Schema::string())
        .with_required_property(FIELD_NETWORK_INFO, string_section(NETWORK_INFO_FIELDS))
        .with_required_property(FIELD_GEOGRAPHY, string_section(GEOGRAPHY_FIELDS))
        .with_required_property(FIELD_CONTACTS, string_section(CONTACT_FIELDS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_schema_shape() {
        let schema = lookup_response_schema();
        assert_eq!(schema.schema_type(), SchemaType::Object);
        assert_eq!(
            schema.required(),
            &["summary", "networkInfo", "geography", "contacts"]
        );

        let network = schema.property("networkInfo").unwrap();
        let names: Vec<&str> = network.properties().map(|(n, _)| n).collect();
        assert_eq!(names, NETWORK_INFO_FIELDS);
        assert!(network.required().is_empty());
        assert!(network
            .properties()
            .all(|(_, s)| s.schema_type() == SchemaType::String));
    }

    #[test]
    fn test_serializes_in_declaration_order() {
        let wire = serde_json::to_string(&lookup_response_schema()).unwrap();
        let summary = wire.find("\"summary\"").unwrap();
        let network = wire.find("\"networkInfo\"").unwrap();
        let geography = wire.find("\"geography\"").unwrap();
        let contacts = wire.find("\"contacts\"").unwrap();
        assert!(summary < network && network < geography && geography < contacts);
        assert!(wire.starts_with(r#"{"type":"OBJECT""#));
    }

    #[test]
    fn test_serialized_schema_structure() {
        let value = serde_json::to_value(lookup_response_schema()).unwrap();
        assert_eq!(value["properties"]["summary"], json!({"type": "STRING"}));
        assert_eq!(
            value["properties"]["contacts"]["properties"]["abuse"],
            json!({"type": "STRING"})
        );
        assert_eq!(
            value["properties"]["geography"]["propertyOrdering"],
            json!(["country", "city", "coordinates"])
        );
        assert!(value["properties"]["contacts"].get("required").is_none());
    }

    #[test]
    fn test_validate_accepts_sparse_sections() {
        let schema = lookup_response_schema();
        let value = json!({
            "summary": "Cloud block",
            "networkInfo": {"cidr": null},
            "geography": {},
            "contacts": {"abuse": "abuse@example.net", "extra": 1}
        });
        assert!(schema.validate(&value).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_section() {
        let schema = lookup_response_schema();
        let value = json!({"summary": "s", "networkInfo": {}, "geography": {}});
        let err = schema.validate(&value).unwrap_err();
        assert!(err.contains("contacts"), "{err}");
    }

    #[test]
    fn test_validate_rejects_null_required_section() {
        let schema = lookup_response_schema();
        let value = json!({"summary": "s", "networkInfo": null, "geography": {}, "contacts": {}});
        assert!(schema.validate(&value).is_err());
    }

    #[test]
    fn test_validate_reports_path_of_wrong_type() {
        let schema = lookup_response_schema();
        let value = json!({
            "summary": "s",
            "networkInfo": {"cidr": 42},
            "geography": {},
            "contacts": {}
        });
        let err = schema.validate(&value).unwrap_err();
        assert!(err.starts_with("$.networkInfo.cidr"), "{err}");
        assert!(err.contains("number"), "{err}");
    }

    #[test]
    fn test_validate_rejects_non_object_root() {
        let err = lookup_response_schema().validate(&json!([1, 2])).unwrap_err();
        assert!(err.contains("array"), "{err}");
    }
}
