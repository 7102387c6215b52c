//! Tool schema derivation from registration-time function signatures.
//!
//! A tool is described once, at registration, by a [`FunctionSignature`]: its
//! name, its doc comment and the ordered parameter list with optional type
//! hints and defaults. [`derive_schema`] turns that descriptor into the
//! [`ToolSchema`] advertised to the chat endpoint.
//!
//! ```rust
//! use htooling::{FunctionSignature, ParamSpec, ParamType, derive_schema};
//!
//! let signature = FunctionSignature::new("calculate_bmi")
//!     .with_doc(
//!         "Calculate the Body Mass Index (BMI) for a person.\n\n\
//!          :param weight: The weight of the person in kg\n\
//!          :param height: The height of the person in cm",
//!     )
//!     .param(ParamSpec::new("weight").with_type_hint("f64"))
//!     .param(ParamSpec::new("height").with_type_hint("f64"));
//!
//! let schema = derive_schema(&signature, &Default::default()).expect("schema should derive");
//! assert_eq!(schema.description, "Calculate the Body Mass Index (BMI) for a person.");
//! assert_eq!(schema.required, vec!["weight", "height"]);
//!
//! let weight = schema.parameter("weight").expect("weight is declared");
//! assert_eq!(weight.param_type, ParamType::Number);
//! assert_eq!(weight.description, "The weight of the person in kg");
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use hprovider::ToolDefinition;
use serde_json::{Map, Value, json};

use crate::SchemaError;

/// Pre-bound argument values keyed by parameter name.
pub type FixedArgs = Map<String, Value>;

const PARAM_MARKER: &str = ":param";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Number,
    Integer,
    String,
}

impl ParamType {
    /// Maps a Rust type name onto the wire type. Unknown or missing hints are strings.
    pub fn from_type_hint(hint: Option<&str>) -> Self {
        let Some(hint) = hint else {
            return Self::String;
        };

        let compact: String = hint.chars().filter(|c| !c.is_whitespace()).collect();
        match unwrap_option_hint(&compact) {
            "f32" | "f64" => Self::Number,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Self::Integer,
            _ => Self::String,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }
}

impl Display for ParamType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unwrap_option_hint(hint: &str) -> &str {
    let inner = hint
        .strip_prefix("Option<")
        .or_else(|| hint.strip_prefix("std::option::Option<"))
        .and_then(|rest| rest.strip_suffix('>'));

    match inner {
        Some(inner) => unwrap_option_hint(inner.trim()),
        None => hint,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub type_hint: Option<String>,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            default: None,
        }
    }

    pub fn with_type_hint(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Registration-time description of a callable.
///
/// `params` is `None` when the parameter list is not known, which makes the
/// callable impossible to expose as a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub doc: Option<String>,
    pub params: Option<Vec<ParamSpec>>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Some(Vec::new()),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.get_or_insert_with(Vec::new).push(param);
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .extend(params);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    pub name: String,
    pub description: String,
    pub param_type: ParamType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// Declaration order is preserved.
    pub parameters: Vec<ParameterSchema>,
    pub required: Vec<String>,
}

impl ToolSchema {
    pub fn parameter(&self, name: &str) -> Option<&ParameterSchema> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|parameter| parameter.name.as_str())
    }

    /// JSON-schema object describing the arguments.
    pub fn parameters_json(&self) -> Value {
        let properties = self
            .parameters
            .iter()
            .map(|parameter| {
                (
                    parameter.name.clone(),
                    json!({
                        "description": parameter.description,
                        "type": parameter.param_type.as_str(),
                    }),
                )
            })
            .collect::<Map<String, Value>>();

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_json(),
        })
    }

    pub fn to_tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.parameters_json().to_string(),
        }
    }
}

/// Derives the schema advertised for `signature` with `fixed_args` pre-bound.
///
/// Fixed arguments disappear from both `parameters` and `required`. A missing
/// doc comment yields empty descriptions; missing parameter metadata fails.
pub fn derive_schema(
    signature: &FunctionSignature,
    fixed_args: &FixedArgs,
) -> Result<ToolSchema, SchemaError> {
    let name = signature.name.trim();
    if !is_identifier(name) {
        return Err(SchemaError::invalid_name(
            signature.name.as_str(),
            "function name must be a non-empty identifier",
        ));
    }

    let params = signature
        .params
        .as_ref()
        .ok_or_else(|| SchemaError::not_introspectable(name))?;

    let mut seen = HashSet::new();
    for param in params {
        if !is_identifier(&param.name) {
            return Err(SchemaError::invalid_name(
                name,
                format!("parameter name '{}' is not an identifier", param.name),
            ));
        }

        if !seen.insert(param.name.as_str()) {
            return Err(SchemaError::duplicate_parameter(name, &param.name));
        }
    }

    if let Some(unknown) = fixed_args.keys().find(|key| !seen.contains(key.as_str())) {
        return Err(SchemaError::unknown_fixed_argument(name, unknown));
    }

    let doc = ParsedDoc::parse(signature.doc.as_deref().unwrap_or_default());
    let exposed = params
        .iter()
        .filter(|param| !fixed_args.contains_key(&param.name));

    let mut parameters = Vec::new();
    let mut required = Vec::new();
    for param in exposed {
        parameters.push(ParameterSchema {
            name: param.name.clone(),
            description: doc
                .param_descriptions
                .get(&param.name)
                .cloned()
                .unwrap_or_default(),
            param_type: ParamType::from_type_hint(param.type_hint.as_deref()),
        });

        if !param.has_default() {
            required.push(param.name.clone());
        }
    }

    Ok(ToolSchema {
        name: name.to_string(),
        description: doc.description,
        parameters,
        required,
    })
}

#[derive(Debug, Default)]
struct ParsedDoc {
    description: String,
    param_descriptions: HashMap<String, String>,
}

impl ParsedDoc {
    fn parse(doc: &str) -> Self {
        let mut lines = Vec::new();
        let mut param_descriptions = HashMap::new();

        for line in doc.lines().map(str::trim) {
            if line.starts_with(PARAM_MARKER) {
                if let Some((name, text)) = parse_param_line(line)
                    && !text.is_empty()
                {
                    param_descriptions.insert(name.to_string(), text.to_string());
                }
                continue;
            }

            lines.push(line);
        }

        let start = lines
            .iter()
            .position(|line| !line.is_empty())
            .unwrap_or(lines.len());
        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(start, |index| index + 1);

        Self {
            description: lines[start..end].join("\n"),
            param_descriptions,
        }
    }
}

/// `:param <name>: <text>`, returning the name and the trimmed text.
fn parse_param_line(line: &str) -> Option<(&str, &str)> {
    let rest = line
        .strip_prefix(PARAM_MARKER)?
        .strip_prefix(char::is_whitespace)?;
    let (name, text) = rest.split_once(':')?;
    let name = name.trim();

    is_identifier(name).then(|| (name, text.trim()))
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::SchemaErrorKind;

    fn add_signature() -> FunctionSignature {
        FunctionSignature::new("add")
            .param(ParamSpec::new("a").with_type_hint("i64"))
            .param(ParamSpec::new("b").with_type_hint("i64"))
    }

    fn bmr_signature() -> FunctionSignature {
        FunctionSignature::new("calculate_bmr")
            .with_doc(
                "Calculate the Basal Metabolic Rate (BMR) for a person.\n\
                 \n\
                 :param weight: The weight of the person in kg.\n\
                 :param height: The height of the person in cm.\n\
                 :param age: The age of the person in years.\n\
                 :param gender: The gender of the person ('male' or 'female')\n\
                 :param equation: The equation to use for BMR calculation",
            )
            .param(ParamSpec::new("weight").with_type_hint("f64"))
            .param(ParamSpec::new("height").with_type_hint("f64"))
            .param(ParamSpec::new("age").with_type_hint("u32"))
            .param(ParamSpec::new("gender").with_type_hint("String"))
            .param(
                ParamSpec::new("equation")
                    .with_type_hint("String")
                    .with_default("mifflin_st_jeor"),
            )
    }

    #[test]
    fn add_without_doc_derives_integer_parameters_all_required() {
        let schema = derive_schema(&add_signature(), &FixedArgs::new()).expect("schema");

        assert_eq!(schema.name, "add");
        assert_eq!(schema.description, "");
        assert_eq!(schema.required, vec!["a", "b"]);
        assert_eq!(
            schema.to_json(),
            json!({
                "name": "add",
                "description": "",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "a": {"description": "", "type": "integer"},
                        "b": {"description": "", "type": "integer"}
                    },
                    "required": ["a", "b"]
                }
            })
        );
    }

    #[test]
    fn required_is_every_parameter_when_none_have_defaults() {
        let signature = FunctionSignature::new("get_nutritional_info")
            .param(ParamSpec::new("query"))
            .param(ParamSpec::new("serving"))
            .param(ParamSpec::new("unit"));

        let schema = derive_schema(&signature, &FixedArgs::new()).expect("schema");
        let names = schema.parameter_names().collect::<Vec<_>>();
        assert_eq!(schema.required, names);
    }

    #[test]
    fn parameters_with_defaults_are_not_required() {
        let schema = derive_schema(&bmr_signature(), &FixedArgs::new()).expect("schema");

        assert_eq!(schema.required, vec!["weight", "height", "age", "gender"]);
        assert!(schema.parameter("equation").is_some());
        for name in schema.parameters.iter().map(|p| &p.name) {
            let declared = bmr_signature()
                .params
                .into_iter()
                .flatten()
                .find(|p| &p.name == name)
                .expect("declared");
            assert_eq!(schema.required.contains(name), !declared.has_default());
        }
    }

    #[test]
    fn documented_parameters_have_non_empty_descriptions() {
        let schema = derive_schema(&bmr_signature(), &FixedArgs::new()).expect("schema");

        assert_eq!(
            schema.description,
            "Calculate the Basal Metabolic Rate (BMR) for a person."
        );
        assert!(schema.parameters.iter().all(|p| !p.description.is_empty()));
        assert_eq!(
            schema.parameter("gender").map(|p| p.description.as_str()),
            Some("The gender of the person ('male' or 'female')")
        );
    }

    #[test]
    fn fixed_args_are_removed_from_parameters_and_required() {
        let mut fixed = FixedArgs::new();
        fixed.insert("gender".to_string(), json!("female"));
        fixed.insert("equation".to_string(), json!("harris_benedict"));

        let schema = derive_schema(&bmr_signature(), &fixed).expect("schema");

        assert!(schema.parameter("gender").is_none());
        assert!(schema.parameter("equation").is_none());
        assert_eq!(schema.required, vec!["weight", "height", "age"]);
        assert_eq!(
            schema.parameter_names().collect::<Vec<_>>(),
            vec!["weight", "height", "age"]
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let mut fixed = FixedArgs::new();
        fixed.insert("age".to_string(), json!(30));

        let first = derive_schema(&bmr_signature(), &fixed).expect("schema");
        let second = derive_schema(&bmr_signature(), &fixed).expect("schema");

        assert_eq!(first, second);
        assert_eq!(first.to_json().to_string(), second.to_json().to_string());
    }

    #[test]
    fn type_hints_map_to_wire_types() {
        assert_eq!(ParamType::from_type_hint(Some("f32")), ParamType::Number);
        assert_eq!(ParamType::from_type_hint(Some("usize")), ParamType::Integer);
        assert_eq!(
            ParamType::from_type_hint(Some("Option<f64>")),
            ParamType::Number
        );
        assert_eq!(ParamType::from_type_hint(Some("&str")), ParamType::String);
        assert_eq!(
            ParamType::from_type_hint(Some("Vec<u8>")),
            ParamType::String
        );
        assert_eq!(ParamType::from_type_hint(None), ParamType::String);
    }

    #[test]
    fn malformed_param_lines_are_dropped_and_other_lines_kept() {
        let signature = FunctionSignature::new("calculate_tdee")
            .with_doc(
                "\n  Calculate the Total Daily Energy Expenditure (TDEE) for a person.\n\
                 :param bmr: The BMR of the person\n\
                 :param activity_level: The activity level of the person\n\
                 ('sedentary', 'lightly_active', 'moderately_active')\n\
                 :param : missing name\n\
                 :params bogus\n\
                 \n",
            )
            .param(ParamSpec::new("bmr").with_type_hint("f64"))
            .param(ParamSpec::new("activity_level"));

        let schema = derive_schema(&signature, &FixedArgs::new()).expect("schema");

        assert_eq!(
            schema.description,
            "Calculate the Total Daily Energy Expenditure (TDEE) for a person.\n\
             ('sedentary', 'lightly_active', 'moderately_active')"
        );
        assert_eq!(
            schema.parameter("activity_level").map(|p| p.description.as_str()),
            Some("The activity level of the person")
        );
    }

    #[test]
    fn unintrospectable_signature_fails() {
        let error = derive_schema(&FunctionSignature::opaque("mystery"), &FixedArgs::new())
            .expect_err("opaque callable should fail");
        assert_eq!(error.kind, SchemaErrorKind::NotIntrospectable);
        assert_eq!(error.function, "mystery");
    }

    #[test]
    fn invalid_names_duplicates_and_unknown_fixed_args_fail() {
        let error = derive_schema(&FunctionSignature::new("  "), &FixedArgs::new())
            .expect_err("blank name should fail");
        assert_eq!(error.kind, SchemaErrorKind::InvalidName);

        let duplicated = add_signature().param(ParamSpec::new("a"));
        let error = derive_schema(&duplicated, &FixedArgs::new()).expect_err("duplicate");
        assert_eq!(error.kind, SchemaErrorKind::DuplicateParameter);

        let mut fixed = FixedArgs::new();
        fixed.insert("c".to_string(), json!(1));
        let error = derive_schema(&add_signature(), &fixed).expect_err("unknown fixed arg");
        assert_eq!(error.kind, SchemaErrorKind::UnknownFixedArgument);
    }

    #[test]
    fn tool_definition_carries_parameters_object() {
        let schema = derive_schema(&add_signature(), &FixedArgs::new()).expect("schema");
        let definition = schema.to_tool_definition();

        assert_eq!(definition.name, "add");
        let parsed: Value = serde_json::from_str(&definition.input_schema).expect("valid json");
        assert_eq!(parsed["type"], "object");
        assert_eq!(parsed["required"], json!(["a", "b"]));
    }
}
