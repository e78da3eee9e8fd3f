use serde_json::Value;

/// Ordered candidate keys for one logical field.
///
/// Earlier keys win when several are present. `deep_search_depth` bounds the
/// last-resort nested lookup; `None` keeps resolution at the top level only.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub keys: &'static [&'static str],
    pub deep_search_depth: Option<usize>,
}

pub const NAME_RULE: FieldRule = FieldRule {
    field: "name",
    keys: &[
        "certificationName",
        "title",
        "examName",
        "appliedSkillName",
        "name",
    ],
    deep_search_depth: Some(2),
};

pub const ISSUE_DATE_RULE: FieldRule = FieldRule {
    field: "issue_date",
    keys: &["issueDate", "achievementDate", "passDate"],
    deep_search_depth: Some(2),
};

pub const EXPIRY_KEY: &str = "expirationDate";
pub const EXPIRY_PARENT_KEY: &str = "certificationStatus";

/// A value found for a rule, with the key that matched and how deep it sat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedField<'a> {
    pub key: &'static str,
    pub value: &'a Value,
    pub depth: usize,
}

impl ResolvedField<'_> {
    /// Scalar rendering of the value; strings are trimmed.
    pub fn as_text(&self) -> Option<String> {
        match self.value {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// First non-empty value among `keys` on the record's top level.
pub fn resolve_top_level<'a>(
    record: &'a Value,
    keys: &'static [&'static str],
) -> Option<ResolvedField<'a>> {
    let fields = record.as_object()?;
    keys.iter().find_map(|&key| {
        fields
            .get(key)
            .filter(|value| is_present(value))
            .map(|value| ResolvedField {
                key,
                value,
                depth: 0,
            })
    })
}

/// Looks up `key` exactly one level down, under `parent`.
pub fn resolve_nested<'a>(
    record: &'a Value,
    parent: &str,
    key: &'static str,
) -> Option<ResolvedField<'a>> {
    record
        .get(parent)
        .and_then(|nested| nested.get(key))
        .filter(|value| is_present(value))
        .map(|value| ResolvedField {
            key,
            value,
            depth: 1,
        })
}

/// Depth-first search below the top level, at most `max_depth` containers deep.
///
/// Objects are checked for every candidate key (in priority order) before
/// their children are visited; array elements are visited in order.
pub fn resolve_within_depth<'a>(
    record: &'a Value,
    keys: &'static [&'static str],
    max_depth: usize,
) -> Option<ResolvedField<'a>> {
    fn visit<'a>(
        value: &'a Value,
        keys: &'static [&'static str],
        depth: usize,
        max_depth: usize,
    ) -> Option<ResolvedField<'a>> {
        if depth > max_depth {
            return None;
        }

        match value {
            Value::Object(fields) => {
                let direct = keys.iter().find_map(|&key| {
                    fields
                        .get(key)
                        .filter(|value| is_present(value))
                        .map(|value| ResolvedField { key, value, depth })
                });
                direct.or_else(|| {
                    fields
                        .values()
                        .find_map(|child| visit(child, keys, depth + 1, max_depth))
                })
            }
            Value::Array(items) => items
                .iter()
                .find_map(|child| visit(child, keys, depth + 1, max_depth)),
            _ => None,
        }
    }

    match record {
        Value::Object(fields) => fields
            .values()
            .find_map(|child| visit(child, keys, 1, max_depth)),
        Value::Array(items) => items
            .iter()
            .find_map(|child| visit(child, keys, 1, max_depth)),
        _ => None,
    }
}

/// Resolves a rule: top level first, then the bounded nested search if allowed.
pub fn resolve<'a>(record: &'a Value, rule: &FieldRule) -> Option<ResolvedField<'a>> {
    resolve_top_level(record, rule.keys).or_else(|| {
        rule.deep_search_depth
            .and_then(|max_depth| resolve_within_depth(record, rule.keys, max_depth))
    })
}
