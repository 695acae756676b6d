use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Descriptor for a tool, in the function-calling shape LLM providers expect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub r#type: String,
    pub function: FunctionDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: ParametersSchema,
}

/// JSON schema types a tool parameter may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub r#type: JsonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Object schema for a tool's parameters
///
/// Properties keep their declaration order through serialization, so a descriptor
/// decoded from JSON compares equal to the one that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersSchema {
    pub r#type: String,
    pub properties: Properties,
    #[serde(default)]
    pub required: Vec<String>,
}

/// Ordered parameter name to schema pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(pub Vec<(String, PropertySchema)>);

impl Properties {
    pub fn get(&self, name: &str) -> Option<&PropertySchema> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, schema)| schema)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in &self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of parameter names to schemas")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, schema)) = access.next_entry::<String, PropertySchema>()? {
                    entries.push((name, schema));
                }
                Ok(Properties(entries))
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

impl ToolDescriptor {
    /// Start a function descriptor with no parameters
    pub fn function(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: name.into(),
                description: description.into(),
                parameters: ParametersSchema {
                    r#type: "object".to_string(),
                    properties: Properties::default(),
                    required: Vec::new(),
                },
            },
        }
    }

    /// Append a required parameter
    pub fn with_parameter(mut self, name: impl Into<String>, r#type: JsonType) -> Self {
        let name = name.into();
        self.function.parameters.required.push(name.clone());
        self.function.parameters.properties.0.push((
            name,
            PropertySchema {
                r#type,
                description: None,
            },
        ));
        self
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Trait for LLM tools
pub trait LlmTool: Send + Sync {
    /// Execute the tool with given arguments
    fn run(&self, args: &HashMap<String, Value>) -> Result<Value>;

    /// Get tool descriptor for LLM
    fn descriptor(&self) -> ToolDescriptor;

    /// Check if this tool matches the given name
    fn matches(&self, name: &str) -> bool {
        self.descriptor().function.name == name
    }

    /// Clone the tool into a Box
    ///
    /// This method is required to support cloning trait objects.
    /// Implementations should return `Box::new(self.clone())`.
    fn clone_box(&self) -> Box<dyn LlmTool>;
}

impl Clone for Box<dyn LlmTool> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Fetch a required string argument
pub(crate) fn string_arg<'a>(args: &'a HashMap<String, Value>, name: &str) -> Result<&'a str> {
    args.get(name).and_then(|v| v.as_str()).ok_or_else(|| {
        crate::error::PlanExecError::ToolError(format!("Missing required argument: {}", name))
    })
}
