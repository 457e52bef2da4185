//! Master-data rows and their form schemas.

use serde::{Deserialize, Serialize};

use crate::forms::{
    Audit, FieldError, FieldKind, FieldSpec, FormValues, MasterRecord, parse_toggle, toggle_value,
};
use crate::listing::Searchable;
use crate::menu::MenuScope;
use crate::model::serde_helper::{bool_lenient, string_lenient, u64_lenient};

const CODE_PATTERN: &str = r"^[A-Za-z0-9_-]{1,20}$";
const CODE_HINT: &str = "use up to 20 letters, digits, '-' or '_'";
const ACTIVE: FieldSpec = FieldSpec::text("is_active", "Active").with_kind(FieldKind::Toggle);

fn form_values<const N: usize>(pairs: [(&str, String); N]) -> FormValues {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn get(values: &FormValues, key: &str) -> String {
    values.get(key).cloned().unwrap_or_default()
}

fn get_u64(values: &FormValues, key: &str) -> u64 {
    values
        .get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|v| v as u64)
        .unwrap_or_default()
}

// ── Company ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Company {
    #[serde(default, deserialize_with = "string_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub company_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub company_name: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub address: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub contact_no: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub email: String,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

const COMPANY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("company_code", "Company Code")
        .required()
        .with_pattern(CODE_PATTERN, CODE_HINT),
    FieldSpec::text("company_name", "Company Name").required(),
    FieldSpec::text("address", "Address"),
    FieldSpec::text("contact_no", "Contact No")
        .with_pattern(r"^\+?[0-9 -]{6,15}$", "enter 6 to 15 digits"),
    FieldSpec::text("email", "Email")
        .with_pattern(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "enter a valid email address"),
    ACTIVE,
];

impl Searchable for Company {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.company_code.as_str(),
            self.company_name.as_str(),
            self.address.as_str(),
            self.email.as_str(),
        ]
    }
}

impl MasterRecord for Company {
    const TITLE: &'static str = "Company Master";
    const ENDPOINT: &'static str = "/api/master/company";

    fn fields() -> &'static [FieldSpec] {
        COMPANY_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn to_values(&self) -> FormValues {
        form_values([
            ("company_code", self.company_code.clone()),
            ("company_name", self.company_name.clone()),
            ("address", self.address.clone()),
            ("contact_no", self.contact_no.clone()),
            ("email", self.email.clone()),
            ("is_active", toggle_value(self.is_active)),
        ])
    }

    fn from_values(id: &str, values: &FormValues) -> Self {
        Self {
            id: id.to_string(),
            company_code: get(values, "company_code"),
            company_name: get(values, "company_name"),
            address: get(values, "address"),
            contact_no: get(values, "contact_no"),
            email: get(values, "email"),
            is_active: parse_toggle(&get(values, "is_active")),
            audit: Audit::default(),
        }
    }
}

// ── UOM ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Uom {
    #[serde(default, deserialize_with = "string_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub uom_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub uom_description: String,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

const UOM_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("uom_code", "UOM Code")
        .required()
        .with_pattern(CODE_PATTERN, CODE_HINT),
    FieldSpec::text("uom_description", "Description").required(),
    ACTIVE,
];

impl Searchable for Uom {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.uom_code.as_str(), self.uom_description.as_str()]
    }
}

impl MasterRecord for Uom {
    const TITLE: &'static str = "UOM Master";
    const ENDPOINT: &'static str = "/api/master/uom";

    fn fields() -> &'static [FieldSpec] {
        UOM_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn to_values(&self) -> FormValues {
        form_values([
            ("uom_code", self.uom_code.clone()),
            ("uom_description", self.uom_description.clone()),
            ("is_active", toggle_value(self.is_active)),
        ])
    }

    fn from_values(id: &str, values: &FormValues) -> Self {
        Self {
            id: id.to_string(),
            uom_code: get(values, "uom_code"),
            uom_description: get(values, "uom_description"),
            is_active: parse_toggle(&get(values, "is_active")),
            audit: Audit::default(),
        }
    }
}

// ── Warehouse category ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WarehouseCategory {
    #[serde(default, deserialize_with = "string_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub category_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub category_description: String,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

const WAREHOUSE_CATEGORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("category_code", "Category Code")
        .required()
        .with_pattern(CODE_PATTERN, CODE_HINT),
    FieldSpec::text("category_description", "Description").required(),
    ACTIVE,
];

impl Searchable for WarehouseCategory {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.category_code.as_str(), self.category_description.as_str()]
    }
}

impl MasterRecord for WarehouseCategory {
    const TITLE: &'static str = "Warehouse Category Master";
    const ENDPOINT: &'static str = "/api/master/warehouse-category";

    fn fields() -> &'static [FieldSpec] {
        WAREHOUSE_CATEGORY_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn to_values(&self) -> FormValues {
        form_values([
            ("category_code", self.category_code.clone()),
            ("category_description", self.category_description.clone()),
            ("is_active", toggle_value(self.is_active)),
        ])
    }

    fn from_values(id: &str, values: &FormValues) -> Self {
        Self {
            id: id.to_string(),
            category_code: get(values, "category_code"),
            category_description: get(values, "category_description"),
            is_active: parse_toggle(&get(values, "is_active")),
            audit: Audit::default(),
        }
    }
}

// ── Item packing ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemPacking {
    #[serde(default, deserialize_with = "string_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_code: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub item_description: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub packing_type: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub qty_per_pack: u64,
    #[serde(default, deserialize_with = "string_lenient")]
    pub uom: String,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

const PACKING_TYPES: &[(&str, &str)] = &[
    ("box", "Box"),
    ("bag", "Bag"),
    ("pallet", "Pallet"),
    ("drum", "Drum"),
    ("roll", "Roll"),
];

const ITEM_PACKING_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("item_code", "Item Code").required(),
    FieldSpec::text("item_description", "Item Description"),
    FieldSpec::text("packing_type", "Packing Type")
        .required()
        .with_kind(FieldKind::Select(PACKING_TYPES)),
    FieldSpec::text("qty_per_pack", "Qty per Pack")
        .required()
        .with_kind(FieldKind::Number {
            min: Some(1.0),
            max: None,
            integer: true,
        }),
    FieldSpec::text("uom", "UOM"),
    ACTIVE,
];

impl Searchable for ItemPacking {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.item_code.as_str(),
            self.item_description.as_str(),
            self.packing_type.as_str(),
            self.uom.as_str(),
        ]
    }
}

impl MasterRecord for ItemPacking {
    const TITLE: &'static str = "Item Packing Master";
    const ENDPOINT: &'static str = "/api/master/item-packing";

    fn fields() -> &'static [FieldSpec] {
        ITEM_PACKING_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn to_values(&self) -> FormValues {
        form_values([
            ("item_code", self.item_code.clone()),
            ("item_description", self.item_description.clone()),
            ("packing_type", self.packing_type.clone()),
            ("qty_per_pack", self.qty_per_pack.to_string()),
            ("uom", self.uom.clone()),
            ("is_active", toggle_value(self.is_active)),
        ])
    }

    fn from_values(id: &str, values: &FormValues) -> Self {
        Self {
            id: id.to_string(),
            item_code: get(values, "item_code"),
            item_description: get(values, "item_description"),
            packing_type: get(values, "packing_type"),
            qty_per_pack: get_u64(values, "qty_per_pack"),
            uom: get(values, "uom"),
            is_active: parse_toggle(&get(values, "is_active")),
            audit: Audit::default(),
        }
    }
}

// ── Session ─────────────────────────────────────────────────────────

pub const MAX_SESSION_MINUTES: u64 = 60;
pub const MAX_SESSION_HOURS: u64 = 48;

const SESSION_UNITS: &[(&str, &str)] = &[("minutes", "Minutes"), ("hours", "Hours")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default, deserialize_with = "string_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub session_name: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub session_time: u64,
    #[serde(default, deserialize_with = "string_lenient")]
    pub session_unit: String,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

const SESSION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("session_name", "Session Name").required(),
    FieldSpec::text("session_time", "Session Time")
        .required()
        .with_kind(FieldKind::Number {
            min: Some(1.0),
            max: None,
            integer: true,
        }),
    FieldSpec::text("session_unit", "Unit")
        .required()
        .with_kind(FieldKind::Select(SESSION_UNITS)),
    ACTIVE,
];

impl Searchable for SessionConfig {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.session_name.as_str(), self.session_unit.as_str()]
    }
}

impl MasterRecord for SessionConfig {
    const TITLE: &'static str = "Session Master";
    const ENDPOINT: &'static str = "/api/master/session";

    fn fields() -> &'static [FieldSpec] {
        SESSION_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn to_values(&self) -> FormValues {
        form_values([
            ("session_name", self.session_name.clone()),
            ("session_time", self.session_time.to_string()),
            ("session_unit", self.session_unit.clone()),
            ("is_active", toggle_value(self.is_active)),
        ])
    }

    fn from_values(id: &str, values: &FormValues) -> Self {
        Self {
            id: id.to_string(),
            session_name: get(values, "session_name"),
            session_time: get_u64(values, "session_time"),
            session_unit: get(values, "session_unit"),
            is_active: parse_toggle(&get(values, "is_active")),
            audit: Audit::default(),
        }
    }

    /// At most 60 minutes or 48 hours.
    fn cross_validate(values: &FormValues) -> Vec<FieldError> {
        let time = get_u64(values, "session_time");
        let limit = match get(values, "session_unit").trim() {
            "minutes" => MAX_SESSION_MINUTES,
            "hours" => MAX_SESSION_HOURS,
            _ => return Vec::new(),
        };
        if time > limit {
            let spec = &SESSION_FIELDS[1];
            vec![FieldError::new(
                spec,
                format!("must be at most {} {}", limit, get(values, "session_unit").trim()),
            )]
        } else {
            Vec::new()
        }
    }
}

// ── User role ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserRole {
    #[serde(default, deserialize_with = "string_lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub role_name: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub role_description: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub web_menu_access: String,
    #[serde(default, deserialize_with = "string_lenient")]
    pub hht_menu_access: String,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

const USER_ROLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("role_name", "Role Name").required(),
    FieldSpec::text("role_description", "Description"),
    FieldSpec::text("web_menu_access", "Web Menu Access")
        .required()
        .with_kind(FieldKind::AccessList(MenuScope::Web)),
    FieldSpec::text("hht_menu_access", "HHT Menu Access")
        .with_kind(FieldKind::AccessList(MenuScope::Hht)),
    ACTIVE,
];

impl Searchable for UserRole {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.role_name.as_str(), self.role_description.as_str()]
    }
}

impl MasterRecord for UserRole {
    const TITLE: &'static str = "User Role Master";
    const ENDPOINT: &'static str = "/api/admin/user-role";

    fn fields() -> &'static [FieldSpec] {
        USER_ROLE_FIELDS
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn to_values(&self) -> FormValues {
        form_values([
            ("role_name", self.role_name.clone()),
            ("role_description", self.role_description.clone()),
            ("web_menu_access", self.web_menu_access.clone()),
            ("hht_menu_access", self.hht_menu_access.clone()),
            ("is_active", toggle_value(self.is_active)),
        ])
    }

    fn from_values(id: &str, values: &FormValues) -> Self {
        Self {
            id: id.to_string(),
            role_name: get(values, "role_name"),
            role_description: get(values, "role_description"),
            web_menu_access: get(values, "web_menu_access"),
            hht_menu_access: get(values, "hht_menu_access"),
            is_active: parse_toggle(&get(values, "is_active")),
            audit: Audit::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FormMode, MasterFormState};

    fn session_row() -> SessionConfig {
        SessionConfig {
            id: "7".into(),
            session_name: "Shift A".into(),
            session_time: 30,
            session_unit: "minutes".into(),
            is_active: true,
            audit: Audit {
                created_by: "admin".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn empty_required_field_blocks_submission() {
        let mut form = MasterFormState::<Company>::new();
        form.set("company_name", "Acme Warehousing");
        let errors = form.submission("admin").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "company_code");
        assert!(form.error_for("company_code").is_some());
    }

    #[test]
    fn create_submission_targets_insert_and_stamps_creator() {
        let mut form = MasterFormState::<Uom>::new();
        form.set("uom_code", "KG");
        form.set("uom_description", " Kilogram ");
        let sub = form.submission("u42").unwrap();
        assert_eq!(sub.url, "/api/master/uom/insert");
        assert_eq!(sub.record.uom_description, "Kilogram");
        assert!(sub.record.is_active);
        assert_eq!(sub.record.audit.created_by, "u42");
        assert!(sub.record.id.is_empty());
    }

    #[test]
    fn edit_populates_exactly_the_row_and_cancel_resets() {
        let row = session_row();
        let mut form = MasterFormState::<SessionConfig>::new();
        let initial = form.clone();

        form.begin_edit(&row);
        assert_eq!(form.mode, FormMode::Edit { id: "7".into() });
        assert_eq!(form.values, row.to_values());

        let sub = form.submission("u1").unwrap();
        assert_eq!(sub.url, "/api/master/session/update");
        assert_eq!(sub.record.id, "7");
        assert_eq!(sub.record.session_time, 30);
        assert_eq!(sub.record.audit.updated_by, "u1");

        form.cancel();
        assert_eq!(form, initial);
        assert!(!form.is_editing());
    }

    #[test]
    fn session_time_bounds_depend_on_unit() {
        let mut form = MasterFormState::<SessionConfig>::new();
        form.set("session_name", "Night");
        form.set("session_time", "61");
        form.set("session_unit", "minutes");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].field, "session_time");
        assert!(errors[0].message.contains("60"));

        form.set("session_time", "60");
        assert!(form.validate().is_ok());

        form.set("session_unit", "hours");
        form.set("session_time", "49");
        assert!(form.validate().is_err());
        form.set("session_time", "48");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn session_time_must_be_a_positive_whole_number() {
        let mut form = MasterFormState::<SessionConfig>::new();
        form.set("session_name", "Day");
        for bad in ["0", "1.5", "ten"] {
            form.set("session_time", bad);
            assert!(form.validate().is_err(), "{} should fail", bad);
        }
    }

    #[test]
    fn pattern_and_select_rules() {
        let mut form = MasterFormState::<Company>::new();
        form.set("company_code", "AC 01");
        form.set("company_name", "Acme");
        form.set("email", "not-an-email");
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["company_code", "email"]);

        let mut packing = MasterFormState::<ItemPacking>::new();
        packing.set("item_code", "FG-100");
        packing.set("packing_type", "crate");
        packing.set("qty_per_pack", "12");
        let errors = packing.validate().unwrap_err();
        assert_eq!(errors[0].field, "packing_type");
    }

    #[test]
    fn role_access_lists_are_checked() {
        let mut form = MasterFormState::<UserRole>::new();
        form.set("role_name", "Operator");
        form.set("web_menu_access", "1,x");
        assert!(form.validate().is_err());
        form.set("web_menu_access", "1,10,30");
        let role = form.validate().unwrap();
        assert_eq!(role.web_menu_access, "1,10,30");
    }

    #[test]
    fn rows_decode_from_backend_shapes() {
        let row: ItemPacking = serde_json::from_str(
            r#"{"id": 3, "item_code": "FG-1", "packing_type": "box", "qty_per_pack": "24",
                "is_active": 1, "created_by": "admin", "updated_on": "2024-02-01"}"#,
        )
        .unwrap();
        assert_eq!(row.id, "3");
        assert_eq!(row.qty_per_pack, 24);
        assert!(row.is_active);
        assert_eq!(row.audit.updated_on, "2024-02-01");
        assert_eq!(row.cell("packing_type"), "Box");
        assert_eq!(row.cell("is_active"), "Yes");
        assert_eq!(row.cell("created_by"), "admin");
    }
}
