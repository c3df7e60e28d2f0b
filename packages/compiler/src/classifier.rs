use entitygen_parser::ast::{InterfaceSpec, MethodSignature, TypeSpec};
use serde::{Deserialize, Serialize};

/// Length of the fixed `set`/`get` accessor prefix
const PREFIX_LEN: usize = 3;

/// A decision to generate a setter, a getter, or neither, for one method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccessorPlan {
    Setter { attribute: String, param: TypeSpec },
    Getter { attribute: String, return_type: TypeSpec },
    Unsupported,
}

/// Derive one plan per method, in source order.
///
/// Classification is by parameter count only: exactly one parameter makes
/// a setter, zero makes a getter, any other arity is silently excluded
/// from the generated surface. The 3-character prefix is stripped blindly;
/// its spelling is never checked.
pub fn classify(spec: &InterfaceSpec) -> Vec<AccessorPlan> {
    spec.methods.iter().map(classify_method).collect()
}

pub fn classify_method(method: &MethodSignature) -> AccessorPlan {
    let attribute: String = method.name.chars().skip(PREFIX_LEN).collect();

    match method.params.len() {
        1 => AccessorPlan::Setter {
            attribute,
            param: method.params[0].type_spec.clone(),
        },
        0 => AccessorPlan::Getter {
            attribute,
            return_type: method.return_type.clone(),
        },
        _ => AccessorPlan::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entitygen_parser::parse_interface;

    fn plans_for(source: &str, name: &str) -> Vec<AccessorPlan> {
        let spec = parse_interface(source, name).expect("Failed to parse");
        classify(&spec)
    }

    #[test]
    fn test_one_param_is_setter() {
        let plans = plans_for(
            "interface AInterface { setId(value: int) -> self }",
            "AInterface",
        );

        assert_eq!(
            plans,
            vec![AccessorPlan::Setter {
                attribute: "Id".to_string(),
                param: TypeSpec::named("int"),
            }]
        );
    }

    #[test]
    fn test_zero_params_is_getter() {
        let plans = plans_for("interface AInterface { getId() -> ?int }", "AInterface");

        assert_eq!(
            plans,
            vec![AccessorPlan::Getter {
                attribute: "Id".to_string(),
                return_type: TypeSpec::nullable("int"),
            }]
        );
    }

    #[test]
    fn test_multi_param_is_unsupported() {
        let plans = plans_for(
            "interface AInterface { setRange(low: int, high: int) -> self }",
            "AInterface",
        );

        assert_eq!(plans, vec![AccessorPlan::Unsupported]);
    }

    #[test]
    fn test_plans_keep_source_order() {
        let plans = plans_for(
            r#"
interface AInterface {
    setId(value: int) -> self
    getId() -> ?int
    setRange(low: int, high: int) -> self
    getName() -> ?string
}
"#,
            "AInterface",
        );

        assert_eq!(plans.len(), 4);
        assert!(matches!(plans[0], AccessorPlan::Setter { .. }));
        assert!(matches!(plans[1], AccessorPlan::Getter { .. }));
        assert!(matches!(plans[2], AccessorPlan::Unsupported));
        assert!(matches!(plans[3], AccessorPlan::Getter { .. }));
    }

    #[test]
    fn test_prefix_is_stripped_blindly() {
        // No spelling check on the prefix: any 3 characters are dropped.
        let plans = plans_for(
            "interface AInterface { putName(value: string) -> self }",
            "AInterface",
        );

        assert_eq!(
            plans,
            vec![AccessorPlan::Setter {
                attribute: "Name".to_string(),
                param: TypeSpec::named("string"),
            }]
        );
    }

    #[test]
    fn test_short_method_name_yields_empty_attribute() {
        let plans = plans_for("interface AInterface { go() }", "AInterface");

        assert_eq!(
            plans,
            vec![AccessorPlan::Getter {
                attribute: String::new(),
                return_type: TypeSpec::untyped(),
            }]
        );
    }
}
