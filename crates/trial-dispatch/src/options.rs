//! Typed CLI options.
//!
//! [`CliOptions`] is the options object handed to the runner engine. Fields
//! that this layer reads or rewrites are typed; every other option is kept
//! as a raw [`OptionValue`] in [`CliOptions::extra`] and passed through
//! untouched.
//!
//! Coverage settings get their own type. `--coverage` alone and
//! `--coverage.exclude dist` both end up as a [`CoverageOptions`], so nothing
//! downstream has to check whether `coverage` is a boolean or a map.

use std::collections::BTreeMap;

use serde::Serialize;
use trial_args::{OptionValue, RawOptions};

use crate::error::OptionsError;

/// Options for one invocation.
///
/// Absent fields are skipped when serialized: absence means "use the
/// runner's default", which is different from an explicit empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_with_no_tests: Option<bool>,
    /// Source files whose covering tests should run (`related` command).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageOptions>,
    /// Every other option, as parsed.
    #[serde(flatten)]
    pub extra: BTreeMap<String, OptionValue>,
}

impl CliOptions {
    /// Builds typed options from the parser's raw map.
    pub fn from_raw(mut raw: RawOptions) -> Result<Self, OptionsError> {
        Ok(Self {
            root: take_string(&mut raw, "root")?,
            config: take_string(&mut raw, "config")?,
            dir: take_string(&mut raw, "dir")?,
            run: take_bool(&mut raw, "run")?,
            watch: take_bool(&mut raw, "watch")?,
            pass_with_no_tests: take_bool(&mut raw, "passWithNoTests")?,
            related: None,
            coverage: raw
                .remove("coverage")
                .map(CoverageOptions::from_value)
                .transpose()?,
            extra: raw,
        })
    }
}

/// Coverage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<OneOrMany>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<OneOrMany>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_class_methods: Option<OneOrMany>,
    /// Other sub-keys (`reporter`, `provider`, ...), as parsed.
    #[serde(flatten)]
    pub extra: BTreeMap<String, OptionValue>,
}

impl CoverageOptions {
    /// Builds coverage settings from `--coverage` or `--coverage.*` values.
    pub fn from_value(value: OptionValue) -> Result<Self, OptionsError> {
        match value {
            OptionValue::Bool(enabled) => Ok(Self {
                enabled: Some(enabled),
                ..Self::default()
            }),
            OptionValue::Map(entries) => {
                let mut coverage = Self::default();
                for (key, value) in entries {
                    match key.as_str() {
                        "enabled" => {
                            coverage.enabled = Some(value.as_bool().ok_or_else(|| {
                                OptionsError::invalid_type(
                                    "coverage.enabled",
                                    "a boolean",
                                    value.type_name(),
                                )
                            })?)
                        }
                        "include" => {
                            coverage.include = Some(OneOrMany::from_value("coverage.include", value)?)
                        }
                        "exclude" => {
                            coverage.exclude = Some(OneOrMany::from_value("coverage.exclude", value)?)
                        }
                        "ignoreClassMethods" => {
                            coverage.ignore_class_methods = Some(OneOrMany::from_value(
                                "coverage.ignoreClassMethods",
                                value,
                            )?)
                        }
                        _ => {
                            coverage.extra.insert(key, value);
                        }
                    }
                }
                Ok(coverage)
            }
            other => Err(OptionsError::invalid_type(
                "coverage",
                "a boolean or dot notation options",
                other.type_name(),
            )),
        }
    }
}

/// A string option that may be given once or several times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn from_value(option: &str, value: OptionValue) -> Result<Self, OptionsError> {
        let expected = "a string or a list of strings";
        match value {
            OptionValue::List(items) => items
                .iter()
                .map(|item| {
                    item.to_scalar_string().ok_or_else(|| {
                        OptionsError::invalid_type(option, expected, item.type_name())
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(OneOrMany::Many),
            other => other
                .to_scalar_string()
                .map(OneOrMany::One)
                .ok_or_else(|| OptionsError::invalid_type(option, expected, other.type_name())),
        }
    }

    /// Promotes a single value to a one-element list.
    pub fn into_many(self) -> Self {
        match self {
            OneOrMany::One(value) => OneOrMany::Many(vec![value]),
            many => many,
        }
    }

    /// The values as a slice, whichever form they are in.
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

fn take_string(raw: &mut RawOptions, key: &str) -> Result<Option<String>, OptionsError> {
    match raw.remove(key) {
        None => Ok(None),
        Some(OptionValue::List(items)) => Err(OptionsError::MultipleValues {
            option: key.to_string(),
            count: items.len(),
        }),
        Some(value) => value
            .to_scalar_string()
            .map(Some)
            .ok_or_else(|| OptionsError::invalid_type(key, "a path", value.type_name())),
    }
}

fn take_bool(raw: &mut RawOptions, key: &str) -> Result<Option<bool>, OptionsError> {
    match raw.remove(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| OptionsError::invalid_type(key, "a boolean", value.type_name())),
    }
}
