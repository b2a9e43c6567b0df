use super::ast::Group;

/// Serialize a group tree to a pretty-printed JSON string.
pub fn to_pretty_json(group: &Group) -> String {
    serde_json::to_string_pretty(group).expect("Group serialization cannot fail")
}
