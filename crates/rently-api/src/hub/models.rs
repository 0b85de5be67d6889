use serde::Serialize;

/// `{entity_id, value}` body for `input_number/set_value`.
#[derive(Debug, Serialize)]
pub(crate) struct EntityValue<'a> {
    pub entity_id: &'a str,
    pub value: f64,
}

/// `{entity_id, option}` body for `input_select/select_option`.
#[derive(Debug, Serialize)]
pub(crate) struct EntityOption<'a> {
    pub entity_id: &'a str,
    pub option: &'a str,
}

/// `{entity_id}` body for `input_boolean` toggles.
#[derive(Debug, Serialize)]
pub(crate) struct EntityTarget<'a> {
    pub entity_id: &'a str,
}
