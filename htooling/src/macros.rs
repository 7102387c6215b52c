/// Builds a [`FunctionSignature`](crate::FunctionSignature) from a Rust-style
/// function header.
///
/// Outer `///` comments become the signature's doc, so `:param name: text`
/// lines describe individual parameters. Parameter types are kept as type
/// hints and a trailing `= value` records a JSON default, which makes the
/// parameter optional.
///
/// ```rust
/// use htooling::{ParamType, derive_schema, tool_signature};
///
/// let signature = tool_signature! {
///     /// Calculate the Basal Metabolic Rate (BMR) for a person.
///     ///
///     /// :param weight: The weight of the person in kg.
///     /// :param age: The age of the person in years.
///     fn calculate_bmr(weight: f64, age: i64, equation: String = "mifflin_st_jeor")
/// };
///
/// let schema = derive_schema(&signature, &Default::default()).expect("schema should derive");
/// assert_eq!(schema.name, "calculate_bmr");
/// assert_eq!(schema.description, "Calculate the Basal Metabolic Rate (BMR) for a person.");
/// assert_eq!(schema.required, vec!["weight", "age"]);
/// assert_eq!(schema.parameter("age").map(|p| p.param_type), Some(ParamType::Integer));
/// ```
#[macro_export]
macro_rules! tool_signature {
    (
        $(#[doc = $doc:literal])*
        fn $name:ident ( $( $param:ident : $ty:ty $(= $default:tt)? ),* $(,)? ) $(;)?
    ) => {{
        let doc_lines: &[&str] = &[$($doc),*];
        let signature = $crate::FunctionSignature::new(stringify!($name));
        let signature = if doc_lines.is_empty() {
            signature
        } else {
            signature.with_doc(doc_lines.join("\n"))
        };

        let params: ::std::vec::Vec<$crate::ParamSpec> = ::std::vec![
            $(
                $crate::ParamSpec::new(stringify!($param))
                    .with_type_hint(stringify!($ty))
                    $(.with_default($crate::__private::serde_json::json!($default)))?
            ),*
        ];
        signature.with_params(params)
    }};
}
