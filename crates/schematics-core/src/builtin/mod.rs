//! Built-in plugin functions
//!
//! The validator/operator/condition set pre-registered on every
//! [`crate::Schematics`]. Each function conforms to the plugin contract in
//! [`crate::registry`]; none of them is special to the engine, and callers
//! can shadow any of them by re-registering the name.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the MIT OR Apache-2.0 license

pub mod arrays;
pub mod conditions;
pub mod country;
pub mod fintech;
pub mod numbers;
pub mod operators;
pub mod strings;
pub mod web;

use crate::registry::{ConditionRegistry, OperatorRegistry, ValidatorRegistry};

/// Register the built-in validator set under its canonical names.
pub fn register_validators(registry: &mut ValidatorRegistry) {
    registry.register("IsString", strings::is_string);
    registry.register("IsInteger", numbers::is_integer);
    registry.register("IsFloat", numbers::is_float);
    registry.register("IsNumber", numbers::is_number);
    registry.register("MaxAllowed", numbers::max_allowed);
    registry.register("MinAllowed", numbers::min_allowed);
    registry.register("InBetween", numbers::in_between);
    registry.register("IsGreaterThanZero", numbers::is_greater_than_zero);
    registry.register("IsLesserThanZero", numbers::is_lesser_than_zero);
    registry.register("ArrayLengthMax", arrays::array_length_max);
    registry.register("ArrayLengthMin", arrays::array_length_min);
    registry.register("StringInOptions", arrays::string_in_options);
    registry.register("StringsExistsInOptions", arrays::strings_exists_in_options);
    registry.register("IsValidIBAN", fintech::is_valid_iban);
    registry.register("IsCountryValid", country::is_country_valid);
    registry.register("IsURL", web::is_url);
    registry.register("StatusCodeCheck", web::status_code_check);
}

/// Register the built-in operator set under its canonical names.
pub fn register_operators(registry: &mut OperatorRegistry) {
    registry.register("ArrayOfObjToObj", operators::array_of_obj_to_obj);
    registry.register("ToUpperCase", operators::to_upper_case);
    registry.register("ToLowerCase", operators::to_lower_case);
    registry.register("TrimSpaces", operators::trim_spaces);
}

/// Register the built-in condition set under its canonical names.
pub fn register_conditions(registry: &mut ConditionRegistry) {
    registry.register("FieldIsProvided", conditions::field_is_provided);
}
