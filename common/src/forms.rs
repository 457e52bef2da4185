//! Schema-driven master-data forms.
//!
//! Every master screen (company, UOM, item packing, ...) is the same
//! create/edit form bound to three endpoints. A record type describes its
//! fields once through [`MasterRecord`] and [`MasterFormState`] does the rest:
//! create ↔ edit transitions, validation, and building the submission.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::listing::Searchable;
use crate::menu::MenuScope;

/// Raw form input keyed by field key.
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    /// Fixed choice list of `(value, label)`.
    Select(&'static [(&'static str, &'static str)]),
    /// `"true"` / `"false"` checkbox.
    Toggle,
    /// Comma-joined menu codes picked from the menu tree.
    AccessList(MenuScope),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Regex the trimmed value must fully match when non-empty.
    pub pattern: Option<(&'static str, &'static str)>,
}

impl FieldSpec {
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            required: false,
            pattern: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// `hint` is shown to the user when the pattern does not match.
    pub const fn with_pattern(mut self, pattern: &'static str, hint: &'static str) -> Self {
        self.pattern = Some((pattern, hint));
        self
    }

    fn default_value(&self) -> String {
        match self.kind {
            FieldKind::Toggle => "true".to_string(),
            FieldKind::Select(options) if self.required => options
                .first()
                .map(|(value, _)| value.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{label}: {message}")]
pub struct FieldError {
    pub field: String,
    pub label: String,
    pub message: String,
}

impl FieldError {
    pub fn new(spec: &FieldSpec, message: impl Into<String>) -> Self {
        Self {
            field: spec.key.to_string(),
            label: spec.label.to_string(),
            message: message.into(),
        }
    }
}

/// Audit columns shared by all master rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
pub struct Audit {
    #[serde(default, deserialize_with = "crate::model::serde_helper::string_lenient")]
    pub created_by: String,
    #[serde(default, deserialize_with = "crate::model::serde_helper::string_lenient")]
    pub created_on: String,
    #[serde(default, deserialize_with = "crate::model::serde_helper::string_lenient")]
    pub updated_by: String,
    #[serde(default, deserialize_with = "crate::model::serde_helper::string_lenient")]
    pub updated_on: String,
}

/// A flat master-data row editable through the generic master screen.
pub trait MasterRecord:
    Clone + PartialEq + Searchable + Serialize + DeserializeOwned + 'static
{
    /// Screen title, e.g. "Company Master".
    const TITLE: &'static str;
    /// Endpoint prefix; the list/insert/update routes hang off it.
    const ENDPOINT: &'static str;

    fn fields() -> &'static [FieldSpec];

    /// Backend id; empty for rows not yet persisted.
    fn id(&self) -> &str;

    fn audit(&self) -> &Audit;

    fn audit_mut(&mut self) -> &mut Audit;

    /// Current values keyed by [`FieldSpec::key`].
    fn to_values(&self) -> FormValues;

    /// Builds a record from already validated values.
    fn from_values(id: &str, values: &FormValues) -> Self;

    /// Rules spanning several fields. Runs after per-field checks pass.
    fn cross_validate(_values: &FormValues) -> Vec<FieldError> {
        Vec::new()
    }

    fn list_url() -> String {
        format!("{}/get-all", Self::ENDPOINT)
    }

    fn insert_url() -> String {
        format!("{}/insert", Self::ENDPOINT)
    }

    fn update_url() -> String {
        format!("{}/update", Self::ENDPOINT)
    }

    /// Text shown in the table cell for `key`.
    fn cell(&self, key: &str) -> String {
        match key {
            "updated_by" => self.audit().updated_by.clone(),
            "updated_on" => self.audit().updated_on.clone(),
            "created_by" => self.audit().created_by.clone(),
            "created_on" => self.audit().created_on.clone(),
            _ => {
                let values = self.to_values();
                let raw = values.get(key).cloned().unwrap_or_default();
                match Self::fields().iter().find(|f| f.key == key).map(|f| f.kind) {
                    Some(FieldKind::Toggle) => {
                        (if raw == "true" { "Yes" } else { "No" }).to_string()
                    }
                    Some(FieldKind::Select(options)) => options
                        .iter()
                        .find(|(value, _)| *value == raw)
                        .map(|(_, label)| label.to_string())
                        .unwrap_or(raw),
                    _ => raw,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// What the screen should send after a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<M> {
    pub url: String,
    pub record: M,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterFormState<M: MasterRecord> {
    pub mode: FormMode,
    pub values: FormValues,
    pub errors: Vec<FieldError>,
    _record: PhantomData<M>,
}

impl<M: MasterRecord> Default for MasterFormState<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MasterRecord> MasterFormState<M> {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            values: M::fields()
                .iter()
                .map(|f| (f.key.to_string(), f.default_value()))
                .collect(),
            errors: Vec::new(),
            _record: PhantomData,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
        self.errors.retain(|e| e.field != key);
    }

    pub fn error_for(&self, key: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == key)
    }

    /// Row "Edit" action: load the row and remember its id.
    pub fn begin_edit(&mut self, row: &M) {
        let mut values = Self::new().values;
        values.extend(row.to_values());
        self.mode = FormMode::Edit {
            id: row.id().to_string(),
        };
        self.values = values;
        self.errors.clear();
    }

    /// "Cancel" action: back to an empty create form.
    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    /// Runs all field rules; on failure the errors are also kept on the state.
    pub fn validate(&mut self) -> Result<M, Vec<FieldError>> {
        let mut errors = validate_fields(M::fields(), &self.values);
        if errors.is_empty() {
            errors = M::cross_validate(&self.values);
        }
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }
        self.errors.clear();

        let id = match &self.mode {
            FormMode::Create => "",
            FormMode::Edit { id } => id.as_str(),
        };
        let trimmed: FormValues = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .collect();
        Ok(M::from_values(id, &trimmed))
    }

    /// Validates and stamps the acting user into the audit columns.
    pub fn submission(&mut self, actor: &str) -> Result<Submission<M>, Vec<FieldError>> {
        let mut record = self.validate()?;
        let url = match self.mode {
            FormMode::Create => {
                record.audit_mut().created_by = actor.to_string();
                M::insert_url()
            }
            FormMode::Edit { .. } => {
                record.audit_mut().updated_by = actor.to_string();
                M::update_url()
            }
        };
        Ok(Submission { url, record })
    }
}

/// Per-field checks: required, numeric bounds, select membership, pattern.
pub fn validate_fields(fields: &[FieldSpec], values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for spec in fields {
        let raw = values.get(spec.key).map(|v| v.trim()).unwrap_or("");
        if raw.is_empty() {
            if spec.required {
                errors.push(FieldError::new(spec, "is required"));
            }
            continue;
        }

        if let Some(message) = check_kind(&spec.kind, raw) {
            errors.push(FieldError::new(spec, message));
            continue;
        }

        if let Some((pattern, hint)) = spec.pattern {
            match Regex::new(pattern) {
                Ok(re) if re.is_match(raw) => {}
                Ok(_) => errors.push(FieldError::new(spec, hint)),
                Err(e) => errors.push(FieldError::new(spec, format!("invalid pattern: {}", e))),
            }
        }
    }
    errors
}

fn check_kind(kind: &FieldKind, raw: &str) -> Option<String> {
    match *kind {
        FieldKind::Text => None,
        FieldKind::Number { min, max, integer } => {
            let Ok(value) = raw.parse::<f64>() else {
                return Some("must be a number".to_string());
            };
            if integer && value.fract() != 0.0 {
                return Some("must be a whole number".to_string());
            }
            if let Some(min) = min {
                if value < min {
                    return Some(format!("must be at least {}", min));
                }
            }
            if let Some(max) = max {
                if value > max {
                    return Some(format!("must be at most {}", max));
                }
            }
            None
        }
        FieldKind::Select(options) => {
            if options.iter().any(|(value, _)| *value == raw) {
                None
            } else {
                Some("is not a valid choice".to_string())
            }
        }
        FieldKind::Toggle => match raw {
            "true" | "false" => None,
            _ => Some("must be true or false".to_string()),
        },
        FieldKind::AccessList(_) => {
            let all_numeric = raw
                .split(',')
                .all(|part| part.trim().parse::<u32>().is_ok());
            if all_numeric {
                None
            } else {
                Some("must be a comma-separated list of menu codes".to_string())
            }
        }
    }
}

/// Parses a toggle value; anything but `"true"` is false.
pub fn parse_toggle(raw: &str) -> bool {
    raw.trim() == "true"
}

pub fn toggle_value(flag: bool) -> String {
    (if flag { "true" } else { "false" }).to_string()
}
